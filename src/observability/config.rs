use std::env;

#[derive(Clone)]
pub(crate) struct ServiceContext {
    pub(crate) service_name: String,
    pub(crate) environment: String,
    pub(crate) component: String,
}

impl ServiceContext {
    pub(crate) fn from_env(component: &str) -> Self {
        Self::from_lookup(component, |key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(component: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let component = component.trim().to_string();

        let service_name = lookup("SERVICE_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| component.clone());

        let environment = lookup("STAGE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            service_name,
            environment,
            component,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_component_and_unknown_stage() {
        let context = ServiceContext::from_lookup(" verify ", |_| None);
        assert_eq!(context.component, "verify");
        assert_eq!(context.service_name, "verify");
        assert_eq!(context.environment, "unknown");
    }

    #[test]
    fn env_values_override_defaults() {
        let context = ServiceContext::from_lookup("seed-free-tier", |key| match key {
            "SERVICE_NAME" => Some("plans-maintenance".to_string()),
            "STAGE" => Some("production".to_string()),
            _ => None,
        });
        assert_eq!(context.service_name, "plans-maintenance");
        assert_eq!(context.environment, "production");
    }
}
