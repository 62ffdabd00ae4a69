use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Change listener, called with the previous and the new value.
type Listener<T> = Arc<dyn Fn(&T, &T) + Send + Sync>;

/// Handle returned by [`ReadOnlyProperty::subscribe`].
///
/// Pass it to [`ReadOnlyProperty::unsubscribe`] to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(usize);

/// A change that has been stored but not yet announced to listeners.
#[derive(Debug)]
pub(crate) struct PendingChange<T> {
    old: T,
    new: T,
}

struct Shared<T> {
    value: RwLock<T>,
    listeners: RwLock<Vec<(Subscription, Listener<T>)>>,
    next_subscription: AtomicUsize,
    dirty: AtomicBool,
}

/// Observable value with interior mutability.
///
/// `Property<T>` works like a reactive state cell: it is cheap to clone
/// (clones share the same value) and can be read from any thread. Unlike a
/// plain state cell it notifies subscribers whenever the stored value
/// actually changes. Setting an equal value is a no-op.
///
/// Owners that want to expose a value without giving out write access hand
/// out a [`ReadOnlyProperty`] via [`Property::read_only`].
///
/// # Example
///
/// ```
/// use passfield::property::Property;
///
/// let count = Property::new(0);
/// let view = count.read_only();
/// view.subscribe(|old, new| println!("{old} -> {new}"));
///
/// count.set(1);
/// assert_eq!(view.get(), 1);
/// ```
pub struct Property<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Property<T> {
    /// Create a new property holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: RwLock::new(value),
                listeners: RwLock::new(Vec::new()),
                next_subscription: AtomicUsize::new(0),
                dirty: AtomicBool::new(false),
            }),
        }
    }

    /// Get a read-only view sharing this property's value and listeners.
    pub fn read_only(&self) -> ReadOnlyProperty<T> {
        ReadOnlyProperty {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        read_value(&self.shared)
    }

    /// Set a new value, notifying listeners if it differs from the old one.
    pub fn set(&self, value: T) {
        if let Some(change) = self.stage(value) {
            self.publish(change);
        }
    }

    /// Store `value` without notifying anyone.
    ///
    /// Returns the pending change if the value differed. Used when several
    /// properties must all hold their new values before any listener runs.
    pub(crate) fn stage(&self, value: T) -> Option<PendingChange<T>> {
        let mut guard = self
            .shared
            .value
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *guard == value {
            return None;
        }
        let old = std::mem::replace(&mut *guard, value.clone());
        self.shared.dirty.store(true, Ordering::SeqCst);
        Some(PendingChange { old, new: value })
    }

    /// Announce a change previously returned by [`Property::stage`].
    ///
    /// A change is outdated once the property holds something other than
    /// `change.new`, for example when an earlier listener set it again.
    /// Outdated changes are not announced to the remaining listeners; the
    /// newer change has already been announced by whoever made it.
    pub(crate) fn publish(&self, change: PendingChange<T>) {
        // Listeners run without any lock held so they may read or subscribe.
        let listeners: Vec<Listener<T>> = self
            .shared
            .listeners
            .read()
            .map(|guard| guard.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();
        for listener in listeners {
            if !self.holds(&change.new) {
                break;
            }
            listener(&change.old, &change.new);
        }
    }

    fn holds(&self, value: &T) -> bool {
        match self.shared.value.read() {
            Ok(guard) => *guard == *value,
            Err(poisoned) => *poisoned.into_inner() == *value,
        }
    }
}

impl<T> Property<T> {
    /// Register a change listener. See [`ReadOnlyProperty::subscribe`].
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T, &T) + Send + Sync + 'static,
    {
        subscribe(&self.shared, listener)
    }

    /// Remove a listener. See [`ReadOnlyProperty::unsubscribe`].
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        unsubscribe(&self.shared, subscription)
    }

    /// Check if the value has changed since the dirty flag was last cleared.
    pub fn is_dirty(&self) -> bool {
        self.shared.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.shared.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_shared("Property", &self.shared, f)
    }
}

/// Read-only view of a [`Property`].
///
/// Observers can read the value and subscribe to changes, but only the
/// owner of the underlying `Property` can change it.
pub struct ReadOnlyProperty<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone> ReadOnlyProperty<T> {
    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        read_value(&self.shared)
    }
}

impl<T> ReadOnlyProperty<T> {
    /// Register a listener called with `(old, new)` after every change.
    ///
    /// Listeners are called on the thread that changed the value, in
    /// registration order.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T, &T) + Send + Sync + 'static,
    {
        subscribe(&self.shared, listener)
    }

    /// Remove a listener. Returns false if it was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        unsubscribe(&self.shared, subscription)
    }

    /// Check if the value has changed since the dirty flag was last cleared.
    pub fn is_dirty(&self) -> bool {
        self.shared.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.shared.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for ReadOnlyProperty<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOnlyProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_shared("ReadOnlyProperty", &self.shared, f)
    }
}

fn read_value<T: Clone>(shared: &Shared<T>) -> T {
    shared
        .value
        .read()
        .map(|guard| guard.clone())
        .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
}

fn subscribe<T, F>(shared: &Shared<T>, listener: F) -> Subscription
where
    F: Fn(&T, &T) + Send + Sync + 'static,
{
    let subscription = Subscription(shared.next_subscription.fetch_add(1, Ordering::SeqCst));
    let listener: Listener<T> = Arc::new(listener);
    if let Ok(mut guard) = shared.listeners.write() {
        guard.push((subscription, listener));
    }
    subscription
}

fn unsubscribe<T>(shared: &Shared<T>, subscription: Subscription) -> bool {
    let Ok(mut guard) = shared.listeners.write() else {
        return false;
    };
    let before = guard.len();
    guard.retain(|(id, _)| *id != subscription);
    guard.len() != before
}

fn debug_shared<T: fmt::Debug>(
    name: &str,
    shared: &Shared<T>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let listeners = shared.listeners.read().map(|g| g.len()).unwrap_or(0);
    match shared.value.read() {
        Ok(value) => f
            .debug_struct(name)
            .field("value", &*value)
            .field("listeners", &listeners)
            .finish(),
        Err(_) => f
            .debug_struct(name)
            .field("value", &"<poisoned>")
            .field("listeners", &listeners)
            .finish(),
    }
}
