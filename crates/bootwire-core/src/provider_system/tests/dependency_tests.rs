use crate::provider_system::dependency::{DependencyError, ProviderDependency};

struct RoutingProvider;

#[test]
fn test_dependency_constructors() {
    let required = ProviderDependency::required("routing");
    assert_eq!(required.provider_name, "routing");
    assert!(required.required);

    let optional = ProviderDependency::optional("metrics");
    assert_eq!(optional.provider_name, "metrics");
    assert!(!optional.required);
}

#[test]
fn test_dependency_on_type_uses_type_identifier() {
    let dep = ProviderDependency::on::<RoutingProvider>();
    assert_eq!(dep.provider_name, std::any::type_name::<RoutingProvider>());
    assert!(dep.provider_name.ends_with("RoutingProvider"));
    assert!(dep.required);
}

#[test]
fn test_dependency_display() {
    assert_eq!(ProviderDependency::required("routing").to_string(), "routing (requires)");
    assert_eq!(ProviderDependency::optional("metrics").to_string(), "metrics (optional)");
}

#[test]
fn test_dependency_error_messages() {
    let missing = DependencyError::MissingProvider {
        provider: "http".to_string(),
        dependency: "routing".to_string(),
    };
    assert_eq!(missing.to_string(), "Service provider 'http' requires 'routing', which is not registered");

    let cycle = DependencyError::CyclicDependency(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(cycle.to_string(), "Circular dependency detected between providers: a, b");
}
