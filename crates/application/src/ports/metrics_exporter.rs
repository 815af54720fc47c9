/// Renders recorded observations as a pull document.
///
/// Rendering has no side effects: two calls without new observations in
/// between return identical output.
pub trait MetricsExporter: Send + Sync {
    fn render(&self) -> String;
}
