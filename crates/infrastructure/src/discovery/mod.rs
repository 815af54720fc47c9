#[cfg(feature = "k8s")]
pub mod kubernetes;
pub mod static_list;

#[cfg(feature = "k8s")]
pub use kubernetes::KubernetesDiscovery;
pub use static_list::StaticDiscovery;
