//! Number atom model.
//!
//! # Responsibility
//! - Own the proton, neutron and electron counts of one atom.
//! - Keep charge, mass number and particle count consistent with those counts.
//! - Emit one change notification per committed composition update.
//!
//! # Invariants
//! - An update commits all three counts or none of them.
//! - Derived quantities are recomputed before any listener runs.
//! - Listeners may read the model but never mutate it while being notified.
//! - A disposed model rejects mutation, listener registration and re-disposal.

use crate::model::element::{element_for, Element};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::{Rc, Weak};

pub type AtomResult<T> = Result<T, AtomStateError>;

/// Names one of the three base counts in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountField {
    Protons,
    Neutrons,
    Electrons,
}

impl CountField {
    /// Stable field name, matching the serialized composition keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Protons => "proton_count",
            Self::Neutrons => "neutron_count",
            Self::Electrons => "electron_count",
        }
    }
}

impl Display for CountField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by [`NumberAtom`] and [`AtomObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomStateError {
    /// A requested count is negative or does not fit a particle count.
    InvalidCount { field: CountField, value: i64 },
    /// The model has been disposed (or dropped, when seen from an observer).
    UseAfterDispose,
    /// A listener tried to change the model while it was being notified.
    ReentrantUpdate,
}

impl Display for AtomStateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCount { field, value } => {
                write!(f, "{field} must be a non-negative integer, got {value}")
            }
            Self::UseAfterDispose => write!(f, "atom model has already been disposed"),
            Self::ReentrantUpdate => {
                write!(f, "atom model cannot be changed while notifying listeners")
            }
        }
    }
}

impl Error for AtomStateError {}

/// Base particle counts of one atom.
///
/// Equality covers the three counts only; derived quantities are functions
/// of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawComposition")]
pub struct AtomComposition {
    pub proton_count: u32,
    pub neutron_count: u32,
    pub electron_count: u32,
}

impl AtomComposition {
    pub const fn new(proton_count: u32, neutron_count: u32, electron_count: u32) -> Self {
        Self {
            proton_count,
            neutron_count,
            electron_count,
        }
    }

    /// Builds a composition from signed input, rejecting negative counts.
    ///
    /// # Errors
    /// - Returns [`AtomStateError::InvalidCount`] for the first count that is
    ///   negative or larger than `u32::MAX`.
    pub fn try_new(proton_count: i64, neutron_count: i64, electron_count: i64) -> AtomResult<Self> {
        Ok(Self {
            proton_count: checked_count(CountField::Protons, proton_count)?,
            neutron_count: checked_count(CountField::Neutrons, neutron_count)?,
            electron_count: checked_count(CountField::Electrons, electron_count)?,
        })
    }

    pub fn charge(&self) -> i64 {
        i64::from(self.proton_count) - i64::from(self.electron_count)
    }

    pub fn mass_number(&self) -> u64 {
        u64::from(self.proton_count) + u64::from(self.neutron_count)
    }

    pub fn total_particle_count(&self) -> u64 {
        self.mass_number() + u64::from(self.electron_count)
    }

    fn with_field(self, field: CountField, value: u32) -> Self {
        match field {
            CountField::Protons => Self {
                proton_count: value,
                ..self
            },
            CountField::Neutrons => Self {
                neutron_count: value,
                ..self
            },
            CountField::Electrons => Self {
                electron_count: value,
                ..self
            },
        }
    }
}

/// Wire shape accepted on deserialization, validated into [`AtomComposition`].
#[derive(Deserialize)]
struct RawComposition {
    proton_count: i64,
    neutron_count: i64,
    electron_count: i64,
}

impl TryFrom<RawComposition> for AtomComposition {
    type Error = AtomStateError;

    fn try_from(value: RawComposition) -> Result<Self, Self::Error> {
        Self::try_new(value.proton_count, value.neutron_count, value.electron_count)
    }
}

fn checked_count(field: CountField, value: i64) -> AtomResult<u32> {
    u32::try_from(value).map_err(|_| AtomStateError::InvalidCount { field, value })
}

/// Quantities computed from an [`AtomComposition`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DerivedQuantities {
    pub charge: i64,
    pub mass_number: u64,
    pub total_particle_count: u64,
}

impl From<AtomComposition> for DerivedQuantities {
    fn from(value: AtomComposition) -> Self {
        Self {
            charge: value.charge(),
            mass_number: value.mass_number(),
            total_particle_count: value.total_particle_count(),
        }
    }
}

/// Handle returned by [`NumberAtom::on_change`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type ChangeListener = Box<dyn FnMut()>;

struct AtomState {
    composition: Cell<AtomComposition>,
    derived: Cell<DerivedQuantities>,
    listeners: RefCell<Vec<(ListenerId, ChangeListener)>>,
    next_listener_id: Cell<u64>,
    disposed: Cell<bool>,
    notifying: Cell<bool>,
}

/// Resets the notifying flag even if a listener panics.
struct NotifyingGuard<'a>(&'a Cell<bool>);

impl Drop for NotifyingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Observable atom built from three base particle counts.
///
/// The model is single-threaded (`!Send`). Listeners receive no payload;
/// they re-read values through an [`AtomObserver`] captured at subscription
/// time.
pub struct NumberAtom {
    state: Rc<AtomState>,
}

impl NumberAtom {
    /// Creates an empty atom (0 protons, 0 neutrons, 0 electrons).
    pub fn new() -> Self {
        Self::from_composition(AtomComposition::default())
    }

    /// Creates an atom from signed counts.
    ///
    /// # Errors
    /// - Returns [`AtomStateError::InvalidCount`] when any count is negative.
    pub fn with_counts(
        proton_count: i64,
        neutron_count: i64,
        electron_count: i64,
    ) -> AtomResult<Self> {
        let composition = AtomComposition::try_new(proton_count, neutron_count, electron_count)?;
        Ok(Self::from_composition(composition))
    }

    pub fn from_composition(composition: AtomComposition) -> Self {
        Self {
            state: Rc::new(AtomState {
                composition: Cell::new(composition),
                derived: Cell::new(DerivedQuantities::from(composition)),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
                disposed: Cell::new(false),
                notifying: Cell::new(false),
            }),
        }
    }

    pub fn proton_count(&self) -> u32 {
        self.state.composition.get().proton_count
    }

    pub fn neutron_count(&self) -> u32 {
        self.state.composition.get().neutron_count
    }

    pub fn electron_count(&self) -> u32 {
        self.state.composition.get().electron_count
    }

    pub fn composition(&self) -> AtomComposition {
        self.state.composition.get()
    }

    pub fn charge(&self) -> i64 {
        self.state.derived.get().charge
    }

    pub fn mass_number(&self) -> u64 {
        self.state.derived.get().mass_number
    }

    pub fn total_particle_count(&self) -> u64 {
        self.state.derived.get().total_particle_count
    }

    pub fn derived(&self) -> DerivedQuantities {
        self.state.derived.get()
    }

    pub fn is_neutral(&self) -> bool {
        self.charge() == 0
    }

    pub fn is_ion(&self) -> bool {
        !self.is_neutral()
    }

    /// Element identified by the current proton count, if known.
    pub fn element(&self) -> Option<Element> {
        element_for(self.proton_count())
    }

    pub fn is_disposed(&self) -> bool {
        self.state.disposed.get()
    }

    /// Replaces all three counts as one update.
    ///
    /// Returns `Ok(true)` when the composition changed and listeners were
    /// notified once, `Ok(false)` when the requested counts equal the current
    /// ones (no notification).
    ///
    /// # Errors
    /// - [`AtomStateError::InvalidCount`] for a negative count; state is kept.
    /// - [`AtomStateError::UseAfterDispose`] after [`NumberAtom::dispose`].
    /// - [`AtomStateError::ReentrantUpdate`] when called from a listener.
    pub fn set_counts(
        &self,
        proton_count: i64,
        neutron_count: i64,
        electron_count: i64,
    ) -> AtomResult<bool> {
        self.ensure_mutable("set_counts")?;
        let next = AtomComposition::try_new(proton_count, neutron_count, electron_count)
            .map_err(|err| {
                warn!("event=atom_update module=model status=error op=set_counts error={err}");
                err
            })?;
        Ok(self.commit(next))
    }

    /// Replaces the composition with an already validated value.
    pub fn set_composition(&self, composition: AtomComposition) -> AtomResult<bool> {
        self.ensure_mutable("set_composition")?;
        Ok(self.commit(composition))
    }

    pub fn set_proton_count(&self, proton_count: i64) -> AtomResult<bool> {
        self.set_single(CountField::Protons, proton_count)
    }

    pub fn set_neutron_count(&self, neutron_count: i64) -> AtomResult<bool> {
        self.set_single(CountField::Neutrons, neutron_count)
    }

    pub fn set_electron_count(&self, electron_count: i64) -> AtomResult<bool> {
        self.set_single(CountField::Electrons, electron_count)
    }

    /// Subscribes to composition changes.
    ///
    /// Listeners run synchronously in registration order after the derived
    /// quantities have been updated.
    pub fn on_change(&self, listener: impl FnMut() + 'static) -> AtomResult<ListenerId> {
        self.ensure_mutable("on_change")?;
        let id = ListenerId(self.state.next_listener_id.get());
        self.state.next_listener_id.set(id.0 + 1);
        self.state
            .listeners
            .borrow_mut()
            .push((id, Box::new(listener)));
        Ok(id)
    }

    /// Unsubscribes one listener. Returns whether it was registered.
    pub fn remove_change_listener(&self, id: ListenerId) -> AtomResult<bool> {
        self.ensure_mutable("remove_change_listener")?;
        let mut listeners = self.state.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        Ok(listeners.len() != before)
    }

    /// Returns a non-owning read handle for use inside listeners.
    pub fn observer(&self) -> AtomObserver {
        AtomObserver {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Moves the model to its terminal state and drops every listener.
    ///
    /// Observers report [`AtomStateError::UseAfterDispose`] before any
    /// listener is released. Getters on the owner keep returning the last
    /// committed values.
    pub fn dispose(&self) -> AtomResult<()> {
        self.ensure_mutable("dispose")?;
        self.state.disposed.set(true);
        let released = std::mem::take(&mut *self.state.listeners.borrow_mut());
        debug!(
            "event=atom_dispose module=model status=ok listeners_released={}",
            released.len()
        );
        drop(released);
        Ok(())
    }

    fn set_single(&self, field: CountField, value: i64) -> AtomResult<bool> {
        self.ensure_mutable("set_count")?;
        let count = checked_count(field, value).map_err(|err| {
            warn!("event=atom_update module=model status=error op=set_count error={err}");
            err
        })?;
        Ok(self.commit(self.composition().with_field(field, count)))
    }

    fn ensure_mutable(&self, op: &str) -> AtomResult<()> {
        let err = if self.state.disposed.get() {
            AtomStateError::UseAfterDispose
        } else if self.state.notifying.get() {
            AtomStateError::ReentrantUpdate
        } else {
            return Ok(());
        };
        warn!("event=atom_update module=model status=error op={op} error={err}");
        Err(err)
    }

    fn commit(&self, next: AtomComposition) -> bool {
        if self.state.composition.get() == next {
            return false;
        }
        self.state.composition.set(next);
        self.state.derived.set(DerivedQuantities::from(next));
        debug!(
            "event=atom_update module=model status=ok protons={} neutrons={} electrons={} charge={}",
            next.proton_count,
            next.neutron_count,
            next.electron_count,
            next.charge()
        );
        self.notify_listeners();
        true
    }

    fn notify_listeners(&self) {
        self.state.notifying.set(true);
        let _guard = NotifyingGuard(&self.state.notifying);
        let mut listeners = self.state.listeners.borrow_mut();
        for (_, listener) in listeners.iter_mut() {
            listener();
        }
    }
}

impl Default for NumberAtom {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for NumberAtom {
    fn eq(&self, other: &Self) -> bool {
        self.composition() == other.composition()
    }
}

impl Eq for NumberAtom {}

impl Debug for NumberAtom {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberAtom")
            .field("composition", &self.composition())
            .field("derived", &self.derived())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Weak read-only view of a [`NumberAtom`].
///
/// Reads fail with [`AtomStateError::UseAfterDispose`] once the model has
/// been disposed or dropped.
#[derive(Clone)]
pub struct AtomObserver {
    state: Weak<AtomState>,
}

impl AtomObserver {
    pub fn composition(&self) -> AtomResult<AtomComposition> {
        self.with_live(|state| state.composition.get())
    }

    pub fn derived(&self) -> AtomResult<DerivedQuantities> {
        self.with_live(|state| state.derived.get())
    }

    pub fn charge(&self) -> AtomResult<i64> {
        Ok(self.derived()?.charge)
    }

    pub fn mass_number(&self) -> AtomResult<u64> {
        Ok(self.derived()?.mass_number)
    }

    pub fn total_particle_count(&self) -> AtomResult<u64> {
        Ok(self.derived()?.total_particle_count)
    }

    pub fn is_live(&self) -> bool {
        self.with_live(|_| ()).is_ok()
    }

    fn with_live<T>(&self, read: impl FnOnce(&AtomState) -> T) -> AtomResult<T> {
        match self.state.upgrade() {
            Some(state) if !state.disposed.get() => Ok(read(&state)),
            _ => Err(AtomStateError::UseAfterDispose),
        }
    }
}

impl Debug for AtomObserver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomObserver")
            .field("live", &self.is_live())
            .finish()
    }
}
