//! Service construction and listener invocation

use tracing::debug;
use wirebox_domain::{
    CallDescriptor, Error, ListenerDescriptor, Result, ServiceDescriptor, ServiceRef, Value,
};

use super::Container;

impl Container {
    /// Construct a service from its definition
    ///
    /// The class identifier and arguments are interpolated, the factory is
    /// resolved and invoked, then properties are assigned and calls made in
    /// declaration order.
    pub(crate) fn build_service(&self, descriptor: &ServiceDescriptor) -> Result<Value> {
        let class = match self.replace_keys(descriptor.class_identifier())? {
            Value::String(class) => class,
            other => {
                return Err(Error::service_invalid_type(format!(
                    "class identifier \"{}\" resolved to {}, required: string",
                    descriptor.class_identifier(),
                    other.kind()
                )));
            }
        };

        let arguments = self.interpolate_arguments(descriptor.constructor_arguments())?;
        let factory = self.inner.resolver.resolve(&class)?;
        let service = ServiceRef::new(class.as_str(), factory(arguments)?);
        debug!(class = %class, "constructed service");

        for (name, value) in descriptor.properties() {
            let value = self.replace_keys_recursive(value.clone())?;
            service.set_property(name, value)?;
        }

        let owner = format!("Class \"{class}\"");
        for call in descriptor.calls() {
            self.invoke(&service, &owner, call.method_name(), call.arguments(), true)?;
        }

        Ok(Value::Object(service))
    }

    /// Fire a listener group
    ///
    /// With `compile` set, method names and arguments are interpolated and the
    /// returned descriptors carry the resolved values. Replays pass `false` so
    /// the frozen values are used verbatim.
    pub(crate) fn call_listeners(
        &self,
        listeners: &[ListenerDescriptor],
        compile: bool,
    ) -> Result<Vec<ListenerDescriptor>> {
        let mut fired = Vec::with_capacity(listeners.len());

        for listener in listeners {
            let key = listener.target_key();
            let owner = format!("Service \"{key}\"");
            let target = self.get(key)?;
            let Value::Object(service) = target else {
                return Err(Error::method_reference(
                    owner,
                    listener.call().method_name(),
                ));
            };

            let method = if compile {
                match self.replace_keys(listener.call().method_name())? {
                    Value::String(method) => method,
                    other => {
                        return Err(Error::listener_invalid_type(format!(
                            "method of listener on \"{key}\" resolved to {}, required: string",
                            other.kind()
                        )));
                    }
                }
            } else {
                listener.call().method_name().to_string()
            };

            let arguments =
                self.invoke(&service, &owner, &method, listener.call().arguments(), compile)?;
            debug!(target = %key, method = %method, "listener fired");
            fired.push(ListenerDescriptor::new(
                key,
                CallDescriptor::new(method, arguments)?,
            ));
        }

        Ok(fired)
    }

    /// Call `method` on `service`, returning the arguments actually passed
    fn invoke(
        &self,
        service: &ServiceRef,
        owner: &str,
        method: &str,
        arguments: &[Value],
        interpolate: bool,
    ) -> Result<Vec<Value>> {
        if !service.has_method(method)? {
            return Err(Error::method_reference(owner, method));
        }
        let arguments = if interpolate {
            self.interpolate_arguments(arguments)?
        } else {
            arguments.to_vec()
        };
        service.call(method, arguments.clone())?;
        Ok(arguments)
    }

    fn interpolate_arguments(&self, arguments: &[Value]) -> Result<Vec<Value>> {
        arguments
            .iter()
            .map(|argument| self.replace_keys_recursive(argument.clone()))
            .collect()
    }
}
