use alloc::{collections::VecDeque, vec::Vec};

/// Push interface required of the containers a buffer factory produces.
pub trait WindowContainer<T>: Send {
  /// Appends a value to the window.
  fn push(&mut self, value: T);
}

impl<T> WindowContainer<T> for Vec<T>
where
  T: Send,
{
  fn push(&mut self, value: T) {
    Self::push(self, value);
  }
}

impl<T> WindowContainer<T> for VecDeque<T>
where
  T: Send,
{
  fn push(&mut self, value: T) {
    self.push_back(value);
  }
}
