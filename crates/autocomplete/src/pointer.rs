//! Outside-pointer capability supplied by the host environment.

/// Where a pointer-down landed relative to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
	/// The text input itself.
	Input,
	/// Inside the open list but not on a row (padding, scrollbar).
	List,
	/// A suggestion row.
	Row(usize),
	/// Anywhere else.
	Outside,
}

/// Host hook for receiving pointer-down events outside the widget.
///
/// The widget subscribes when its list opens and unsubscribes when it closes
/// or unmounts; calls always come in matched pairs.
pub trait OutsidePointer: Send {
	fn subscribe(&mut self);
	fn unsubscribe(&mut self);
}

/// No-op capability for hosts that route every pointer event explicitly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOutsidePointer;

impl OutsidePointer for NoOutsidePointer {
	fn subscribe(&mut self) {}
	fn unsubscribe(&mut self) {}
}

/// Subscription state of the outside-pointer listener.
///
/// A fresh subscription starts `Pending` so the pointer event that opened the
/// list cannot also close it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum OutsideWatch {
	#[default]
	Detached,
	Pending,
	Armed,
}
