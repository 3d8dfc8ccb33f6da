use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

/// An observable state container with a single logical writer.
///
/// Reads clone the current value; writes store the new value and then notify
/// subscribers synchronously, in subscription order, with the value just
/// written. Callbacks may read any observable but must not subscribe or
/// unsubscribe from within a notification.
pub struct Observable<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    value: Mutex<T>,
    subscribers: Mutex<Vec<(usize, Callback<T>)>>,
    next_id: AtomicUsize,
}

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(usize);

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: Mutex::new(value),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicUsize::new(0),
            }),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.inner
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, value: T) {
        {
            let mut guard = self
                .inner
                .value
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = value.clone();
        }
        self.notify(&value);
    }

    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        let value = {
            let mut guard = self
                .inner
                .value
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            mutate(&mut guard);
            guard.clone()
        };
        self.notify(&value);
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Box::new(callback)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(id, _)| *id != subscription.0);
    }

    fn notify(&self, value: &T) {
        let subscribers = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, callback) in subscribers.iter() {
            callback(value);
        }
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Observable").field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::Observable;

    #[test]
    fn set_stores_and_notifies_in_subscription_order() {
        let observable = Observable::new(0_u32);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&seen);
        observable.subscribe(move |value| first.lock().unwrap().push(("first", *value)));
        let second = Arc::clone(&seen);
        observable.subscribe(move |value| second.lock().unwrap().push(("second", *value)));

        observable.set(7);

        assert_eq!(observable.get(), 7);
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[("first", 7), ("second", 7)]
        );
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let observable = Observable::new(String::new());
        let seen = Arc::new(Mutex::new(0_usize));

        let counter = Arc::clone(&seen);
        let subscription = observable.subscribe(move |_| *counter.lock().unwrap() += 1);

        observable.set("one".to_string());
        observable.unsubscribe(subscription);
        observable.set("two".to_string());

        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn update_mutates_in_place_and_notifies() {
        let observable = Observable::new(vec![1, 2]);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        observable.subscribe(move |value: &Vec<i32>| sink.lock().unwrap().push(value.clone()));

        observable.update(|items| items.push(3));

        assert_eq!(observable.get(), vec![1, 2, 3]);
        assert_eq!(seen.lock().unwrap().as_slice(), &[vec![1, 2, 3]]);
    }

    #[test]
    fn clones_share_state() {
        let observable = Observable::new(1_u8);
        let alias = observable.clone();
        alias.set(9);
        assert_eq!(observable.get(), 9);
    }
}
