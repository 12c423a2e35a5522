/// Terminal pathway observed by a consumer's teardown hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
  /// The stream completed successfully.
  Complete,
  /// The stream failed.
  Error,
  /// The consumer cancelled the subscription.
  Cancel,
}
