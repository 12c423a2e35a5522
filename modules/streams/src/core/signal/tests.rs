use super::Signal;
use crate::core::stream_error::StreamError;

#[test]
fn terminal_signals_are_flagged() {
  assert!(!Signal::Next(1).is_terminal());
  assert!(Signal::<u32>::Complete.is_terminal());
  assert!(Signal::<u32>::Error(StreamError::MissingContainer).is_terminal());
}

#[test]
fn only_next_carries_a_value() {
  assert_eq!(Signal::Next(7).into_value(), Some(7));
  assert_eq!(Signal::<u32>::Complete.into_value(), None);
}
