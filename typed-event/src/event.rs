//! The event dispatcher
//!
//! An [`Event`] owns an ordered list of callbacks sharing one signature and
//! calls each of them, in subscription order, whenever it is dispatched.

use crate::handler::{DispatchError, Handler, Outcome};
use crate::types::{EventError, Result};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// An ordered list of subscribers with a common callback shape `C`
///
/// `C` is an unsized function type, for example `dyn Fn(&str, u64)` or
/// `dyn Fn(&str) -> Result<(), MyError>`. Callbacks are handed over as
/// `Rc<C>`; keep a clone of the handle to unsubscribe later. Two handles refer
/// to the same callback when they point to the same allocation.
///
/// Every method takes `&self`, so a subscriber may subscribe or unsubscribe on
/// the event that is currently dispatching to it. The event is neither `Send`
/// nor `Sync`: callers sharing one across threads have to bring their own
/// synchronization.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use typed_event::Event;
///
/// let on_user_login: Event<dyn Fn(&str, u64)> = Event::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let log = Rc::clone(&seen);
/// let welcome: Rc<dyn Fn(&str, u64)> = Rc::new(move |username: &str, user_id: u64| {
///     log.borrow_mut().push(format!("{} ({})", username, user_id));
/// });
/// on_user_login.subscribe(Rc::clone(&welcome));
///
/// on_user_login.dispatch(("Alice", 1)).unwrap();
/// assert_eq!(*seen.borrow(), vec!["Alice (1)".to_string()]);
///
/// on_user_login.unsubscribe(&welcome).unwrap();
/// assert!(on_user_login.is_empty());
/// ```
pub struct Event<C: ?Sized> {
    subscribers: RefCell<Vec<Rc<C>>>,
}

impl<C: ?Sized> Event<C> {
    /// Create an event with no subscribers
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Create an event with room for `capacity` subscribers
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            subscribers: RefCell::new(Vec::with_capacity(capacity)),
        }
    }

    /// Append `callback` to the end of the subscriber list
    ///
    /// There is no deduplication: subscribing the same handle twice creates two
    /// independent entries and the callback runs twice per dispatch.
    pub fn subscribe(&self, callback: Rc<C>) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.push(callback);
        log::trace!("Subscribed callback ({} subscriber(s))", subscribers.len());
    }

    /// Remove the first occurrence of `callback`
    ///
    /// The remaining subscribers keep their relative order. If the callback was
    /// subscribed several times, only one entry goes away per call.
    ///
    /// # Returns
    /// * `Err(EventError::NotFound)` if `callback` is not subscribed; the list
    ///   is left untouched
    pub fn unsubscribe(&self, callback: &Rc<C>) -> Result<()> {
        let mut subscribers = self.subscribers.borrow_mut();

        match subscribers.iter().position(|s| same_callback(s, callback)) {
            Some(index) => {
                subscribers.remove(index);
                log::trace!(
                    "Unsubscribed callback at position {} ({} subscriber(s) left)",
                    index,
                    subscribers.len()
                );
                Ok(())
            }
            None => {
                log::debug!("Unsubscribe requested for a callback that is not subscribed");
                Err(EventError::NotFound)
            }
        }
    }

    /// Subscribe `callback` and hand the same handle back
    ///
    /// Useful for defining and registering a listener in one expression while
    /// keeping the handle around for a later [`unsubscribe`](Self::unsubscribe).
    pub fn event_listener(&self, callback: Rc<C>) -> Rc<C> {
        self.subscribe(Rc::clone(&callback));
        callback
    }

    /// Call every subscriber, in subscription order, with a clone of `args`
    ///
    /// `args` is the callback's parameter list as a tuple: `()` for `dyn Fn()`,
    /// `("Alice", 30, true)` for `dyn Fn(&str, u32, bool)`.
    ///
    /// Dispatch stops at the first subscriber that fails. Its error is returned
    /// as is; subscribers before it have already run, subscribers after it are
    /// skipped for this call. Panics are not caught either.
    ///
    /// # Mutation during dispatch
    ///
    /// The live list is walked by position, not a snapshot. A subscriber added
    /// during dispatch runs in the same pass, and a later subscriber removed
    /// during dispatch is not called. Removing an entry at or before the
    /// current position shifts the rest left, so the next subscriber is
    /// skipped. Don't rely on the latter.
    pub fn dispatch<Args>(&self, args: Args) -> std::result::Result<(), DispatchError<C, Args>>
    where
        C: Handler<Args>,
        C::Output: Outcome,
        Args: Clone,
    {
        log::trace!("Dispatching to {} subscriber(s)", self.len());

        let mut index = 0;
        while let Some(callback) = self.subscriber_at(index) {
            // no borrow of the list is held while the callback runs
            if let Err(err) = Handler::invoke(&*callback, args.clone()).into_result() {
                log::debug!(
                    "Subscriber at position {} failed, skipping the remaining subscribers",
                    index
                );
                return Err(err);
            }
            index += 1;
        }

        Ok(())
    }

    /// Number of entries in the subscriber list (duplicates included)
    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }

    /// Check whether `callback` is subscribed at least once
    pub fn contains(&self, callback: &Rc<C>) -> bool {
        self.subscribers
            .borrow()
            .iter()
            .any(|s| same_callback(s, callback))
    }

    /// How many times `callback` is subscribed
    pub fn subscriber_count(&self, callback: &Rc<C>) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|s| same_callback(s, callback))
            .count()
    }

    fn subscriber_at(&self, index: usize) -> Option<Rc<C>> {
        self.subscribers.borrow().get(index).cloned()
    }
}

impl<C: ?Sized> Default for Event<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> fmt::Debug for Event<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Identity comparison; vtable pointers are ignored
fn same_callback<C: ?Sized>(a: &Rc<C>, b: &Rc<C>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    type Simple = dyn Fn();

    fn noop() -> Rc<Simple> {
        Rc::new(|| {})
    }

    #[test]
    fn test_event_starts_empty() {
        let event: Event<Simple> = Event::new();
        assert!(event.is_empty());
        assert_eq!(event.len(), 0);

        let event: Event<Simple> = Event::with_capacity(4);
        assert!(event.is_empty());

        let event: Event<Simple> = Event::default();
        assert!(event.is_empty());
    }

    #[test]
    fn test_subscribe_appends() {
        let event: Event<Simple> = Event::new();
        let first = noop();
        let second = noop();

        event.subscribe(Rc::clone(&first));
        event.subscribe(Rc::clone(&second));

        assert_eq!(event.len(), 2);
        assert!(event.contains(&first));
        assert!(event.contains(&second));
        assert!(!event.contains(&noop()));
    }

    #[test]
    fn test_identity_is_per_allocation() {
        let event: Event<Simple> = Event::new();
        let callback = noop();

        event.subscribe(Rc::clone(&callback));
        event.subscribe(Rc::clone(&callback));
        event.subscribe(noop());

        assert_eq!(event.subscriber_count(&callback), 2);
        assert_eq!(event.len(), 3);
    }

    #[test]
    fn test_unsubscribe_keeps_order() {
        let event: Event<dyn Fn() -> u8> = Event::new();
        let one: Rc<dyn Fn() -> u8> = Rc::new(|| 1);
        let two: Rc<dyn Fn() -> u8> = Rc::new(|| 2);
        let three: Rc<dyn Fn() -> u8> = Rc::new(|| 3);

        event.subscribe(Rc::clone(&one));
        event.subscribe(Rc::clone(&two));
        event.subscribe(Rc::clone(&three));
        event.unsubscribe(&two).unwrap();

        let remaining: Vec<u8> = event.subscribers.borrow().iter().map(|cb| cb()).collect();
        assert_eq!(remaining, vec![1, 3]);
    }

    #[test]
    fn test_unsubscribe_missing() {
        let event: Event<Simple> = Event::new();
        event.subscribe(noop());

        assert_eq!(event.unsubscribe(&noop()), Err(EventError::NotFound));
        assert_eq!(event.len(), 1);
    }

    #[test]
    fn test_event_listener_returns_same_handle() {
        let event: Event<Simple> = Event::new();
        let callback = noop();

        let returned = event.event_listener(Rc::clone(&callback));

        assert!(same_callback(&returned, &callback));
        assert_eq!(event.subscriber_count(&callback), 1);
    }

    #[test]
    fn test_debug_shows_count() {
        let event: Event<Simple> = Event::new();
        event.subscribe(noop());
        assert_eq!(format!("{:?}", event), "Event { subscribers: 1 }");
    }
}
