//! Templates: the mapping from state to an immutable rendering form.
//!
//! A template either re-selects from state every frame, or carries a form
//! fixed at construction. The two binding modes are separate types, so a
//! template's mode is always declared where the type is defined:
//!
//! - **Singleton** templates implement [`SingletonTemplate`] (which requires
//!   `Default`, i.e. argument-free construction). They are only obtained
//!   through [`singleton`] / [`shared`], which hand out one instance per
//!   concrete type.
//! - **Fixed-form** templates are [`FixedForm`] values. Each construction is
//!   a fresh, exclusively owned instance that is never registered.
//!
//! Artists hold templates as [`TemplateRef`], the type-erased, shareable
//! handle both modes convert into.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::component::Component;
use crate::state::{Selector, StateModel};

/// Maps a state snapshot to a form.
pub trait Template<S: StateModel>: 'static {
    type Selected;
    type Form;

    /// Narrows `state`. Must not have side effects.
    fn select_state(&self, state: &S) -> Self::Selected;

    /// Produces the form for `selected`. Pure given its inputs.
    fn bind(&self, selected: Self::Selected, owner: &Component<S>) -> Self::Form;

    /// The form this template binds to regardless of state, if any.
    fn fixed_form(&self) -> Option<&Self::Form> {
        None
    }
}

/// Object-safe view of a [`Template`]: `select_state` then `bind` in one call.
pub trait Bind<S: StateModel, F> {
    fn bind_state(&self, state: &S, owner: &Component<S>) -> F;

    fn constant_form(&self) -> Option<&F>;
}

impl<S: StateModel, T: Template<S>> Bind<S, T::Form> for T {
    #[inline]
    fn bind_state(&self, state: &S, owner: &Component<S>) -> T::Form {
        self.bind(self.select_state(state), owner)
    }

    #[inline]
    fn constant_form(&self) -> Option<&T::Form> {
        self.fixed_form()
    }
}

/// Shared handle to a template producing forms of type `F`.
pub type TemplateRef<S, F> = Rc<dyn Bind<S, F>>;

// ── singleton binding ─────────────────────────────────────────────────────

/// A template shared by every artist that references its type.
///
/// [`singleton`] and [`shared`] are the only constructors that give the
/// sharing guarantee. `Default` is how the registry builds the one instance;
/// a value made by calling `T::default()` directly is a separate, unregistered
/// template that never takes part in identity sharing. Keep singleton types
/// field-less so such a stray value cannot differ from the shared one.
pub trait SingletonTemplate: Default + 'static {}

thread_local! {
    // One instance per concrete type. Written once per type, read thereafter.
    static SINGLETONS: RefCell<HashMap<TypeId, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

/// The instance of `T`, built with `T::default()` on first request.
///
/// The registry lives in thread-local storage: the tree is driven from a
/// single rendering thread, and a template requested from another thread
/// gets that thread's own instance.
pub fn singleton<T: SingletonTemplate>() -> Rc<T> {
    let key = TypeId::of::<T>();
    let existing = SINGLETONS
        .with(|registry| registry.borrow().get(&key).cloned())
        .and_then(|any| any.downcast::<T>().ok());
    if let Some(instance) = existing {
        return instance;
    }

    // Built outside the borrow so `T::default` may request other singletons.
    let instance = Rc::new(T::default());
    log::debug!("created singleton template {}", std::any::type_name::<T>());
    SINGLETONS.with(|registry| registry.borrow_mut().insert(key, instance.clone()));
    instance
}

/// Whether the instance of `T` has been built yet.
pub fn is_registered<T: SingletonTemplate>() -> bool {
    SINGLETONS.with(|registry| registry.borrow().contains_key(&TypeId::of::<T>()))
}

/// [`singleton`] as a [`TemplateRef`].
pub fn shared<S, T>() -> TemplateRef<S, T::Form>
where
    S: StateModel,
    T: SingletonTemplate + Template<S>,
{
    singleton::<T>()
}

// ── fixed-form binding ────────────────────────────────────────────────────

/// A template whose form is captured once and returned verbatim.
///
/// Ignores both state and owner.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedForm<F> {
    form: F,
}

impl<F> FixedForm<F> {
    pub fn new(form: F) -> Self {
        Self { form }
    }

    pub fn form(&self) -> &F {
        &self.form
    }
}

impl<S: StateModel, F: Clone + 'static> Template<S> for FixedForm<F> {
    type Selected = ();
    type Form = F;

    #[inline]
    fn select_state(&self, _state: &S) {}

    #[inline]
    fn bind(&self, _selected: (), _owner: &Component<S>) -> F {
        self.form.clone()
    }

    fn fixed_form(&self) -> Option<&F> {
        Some(&self.form)
    }
}

/// A fresh fixed-form template as a [`TemplateRef`].
pub fn fixed<S: StateModel, F: Clone + 'static>(form: F) -> TemplateRef<S, F> {
    Rc::new(FixedForm::new(form))
}

// ── functional templates ──────────────────────────────────────────────────

/// A non-singleton template assembled from a selector and a bind function.
pub struct FnTemplate<Sel, B, T, F> {
    selector: Sel,
    binder: B,
    _types: PhantomData<fn() -> (T, F)>,
}

impl<Sel, B, T, F> FnTemplate<Sel, B, T, F> {
    pub fn new(selector: Sel, binder: B) -> Self {
        Self { selector, binder, _types: PhantomData }
    }
}

impl<S, Sel, B, T, F> Template<S> for FnTemplate<Sel, B, T, F>
where
    S: StateModel,
    Sel: Selector<S, T> + 'static,
    B: Fn(T, &Component<S>) -> F + 'static,
    T: 'static,
    F: 'static,
{
    type Selected = T;
    type Form = F;

    fn select_state(&self, state: &S) -> T {
        self.selector.select(state)
    }

    fn bind(&self, selected: T, owner: &Component<S>) -> F {
        (self.binder)(selected, owner)
    }
}

/// A fresh [`FnTemplate`] as a [`TemplateRef`].
pub fn from_fns<S, Sel, B, T, F>(selector: Sel, binder: B) -> TemplateRef<S, F>
where
    S: StateModel,
    Sel: Selector<S, T> + 'static,
    B: Fn(T, &Component<S>) -> F + 'static,
    T: 'static,
    F: 'static,
{
    Rc::new(FnTemplate::new(selector, binder))
}
