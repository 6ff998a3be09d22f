//! Pan recognizer lifecycle on the hosting view.
//!
//! A picker only receives drags while its recognizer is installed on the
//! host. Installing and removing are idempotent so mount, unmount, scroll
//! toggling and drop can all call them without leaving a dangling
//! recognizer behind.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Handle to a recognizer installed on a [`GestureHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecognizerId(pub u64);

/// The view a picker is displayed in.
pub trait GestureHost {
    /// Installs a pan recognizer that forwards to the picker.
    fn add_pan_recognizer(&mut self) -> RecognizerId;

    /// Removes a recognizer returned by [`add_pan_recognizer`](Self::add_pan_recognizer).
    fn remove_pan_recognizer(&mut self, id: RecognizerId);
}

/// Weak link from a picker to its host plus the installed recognizer.
#[derive(Default)]
pub struct InputBinding {
    host: Option<Weak<RefCell<dyn GestureHost>>>,
    recognizer: Option<RecognizerId>,
}

impl InputBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds to `host`, detaching from any previous host first.
    pub fn mount<H: GestureHost + 'static>(&mut self, host: &Rc<RefCell<H>>) {
        if !self.detach() {
            log::warn!("remounting while the previous gesture host is busy");
            self.recognizer = None;
        }
        let host: Rc<RefCell<dyn GestureHost>> = host.clone();
        self.host = Some(Rc::downgrade(&host));
    }

    /// Detaches and forgets the host.
    ///
    /// A host that is busy keeps the binding so a later `unmount` can
    /// still remove the recognizer.
    pub fn unmount(&mut self) {
        if self.detach() {
            self.host = None;
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.host().is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn recognizer(&self) -> Option<RecognizerId> {
        self.recognizer
    }

    /// Installs the recognizer if it is not installed yet.
    ///
    /// Returns whether a recognizer is installed afterwards; without a live
    /// host nothing can be installed.
    pub fn attach(&mut self) -> bool {
        if self.recognizer.is_some() {
            return true;
        }
        let Some(host) = self.host() else {
            return false;
        };
        let id = host.borrow_mut().add_pan_recognizer();
        log::debug!("attached pan recognizer {id:?}");
        self.recognizer = Some(id);
        true
    }

    /// Removes the recognizer if one is installed.
    ///
    /// Returns whether no recognizer is left installed. When the host is
    /// borrowed elsewhere the recognizer is kept and the next call retries.
    pub fn detach(&mut self) -> bool {
        let Some(id) = self.recognizer else {
            return true;
        };
        let Some(host) = self.host() else {
            // The view is gone and took its recognizers with it.
            self.recognizer = None;
            return true;
        };
        let removed = match host.try_borrow_mut() {
            Ok(mut host) => {
                host.remove_pan_recognizer(id);
                true
            }
            Err(_) => false,
        };
        if removed {
            log::debug!("detached pan recognizer {id:?}");
            self.recognizer = None;
        } else {
            log::warn!("gesture host busy, pan recognizer {id:?} still installed");
        }
        removed
    }

    fn host(&self) -> Option<Rc<RefCell<dyn GestureHost>>> {
        self.host.as_ref().and_then(Weak::upgrade)
    }
}

impl fmt::Debug for InputBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputBinding")
            .field("mounted", &self.is_mounted())
            .field("recognizer", &self.recognizer)
            .finish()
    }
}
