//! Signal - observable value for the navigation snapshot.
//!
//! `Signal<T>` holds a value shared through `Rc<RefCell<T>>` and notifies
//! subscribers after every `set()` or `update()`. Renderers subscribe once and
//! re-render from the snapshot they receive.
//!
//! ## Example
//!
//! ```
//! use wayfinder_router::Signal;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let count = Signal::new(0);
//! let seen = Rc::new(Cell::new(0));
//!
//! let sink = Rc::clone(&seen);
//! count.subscribe(move |value| sink.set(*value));
//!
//! count.set(42);
//! assert_eq!(count.get(), 42);
//! assert_eq!(seen.get(), 42);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Handle identifying a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// An observable value.
///
/// Cloning a `Signal` shares the value and the subscriber list.
pub struct Signal<T: 'static> {
	value: Rc<RefCell<T>>,
	subscribers: Rc<RefCell<Vec<(SubscriptionId, Subscriber<T>)>>>,
	next_id: Rc<Cell<u64>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			subscribers: Rc::clone(&self.subscribers),
			next_id: Rc::clone(&self.next_id),
		}
	}
}

impl<T: 'static> Signal<T> {
	/// Create a new Signal with the given initial value
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			subscribers: Rc::new(RefCell::new(Vec::new())),
			next_id: Rc::new(Cell::new(0)),
		}
	}

	/// Get a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Read the current value through a closure without cloning it.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Set the signal to a new value and notify subscribers.
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.value.borrow_mut() = value;
		self.notify();
	}

	/// Update the value in place and notify subscribers once.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
		T: Clone,
	{
		f(&mut *self.value.borrow_mut());
		self.notify();
	}

	/// Register a callback invoked with the new value after every change.
	pub fn subscribe<F>(&self, f: F) -> SubscriptionId
	where
		F: Fn(&T) + 'static,
	{
		let id = SubscriptionId(self.next_id.get());
		self.next_id.set(id.0 + 1);
		self.subscribers.borrow_mut().push((id, Rc::new(f)));
		id
	}

	/// Remove a subscription. Returns whether it was registered.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut subscribers = self.subscribers.borrow_mut();
		let before = subscribers.len();
		subscribers.retain(|(sid, _)| *sid != id);
		subscribers.len() != before
	}

	/// Returns the number of active subscriptions.
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.borrow().len()
	}

	fn notify(&self)
	where
		T: Clone,
	{
		// Subscribers get a snapshot and a copy of the list, so they may read
		// or write this signal, or subscribe, without a borrow conflict.
		let snapshot = self.get();
		let subscribers: Vec<Subscriber<T>> = self
			.subscribers
			.borrow()
			.iter()
			.map(|(_, f)| Rc::clone(f))
			.collect();
		for subscriber in subscribers {
			subscriber(&snapshot);
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.value.borrow())
			.field("subscribers", &self.subscribers.borrow().len())
			.finish()
	}
}
