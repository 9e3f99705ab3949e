//! The labelling function (§4.1): a fixed bank of event detectors run over
//! every ground transition.

use crm_core::{Event, EventSet};

/// One named event detector: a pure predicate over a ground transition that
/// either fires (`Some(event)`) or abstains (`None`).
///
/// A detector may not raise; "cannot decide" is represented by returning
/// `None`, not by panicking or erroring.
pub type Detector<O, A> = Box<dyn Fn(&O, &A, &O) -> Option<Event> + Send + Sync>;

/// A bank of event detectors, fixed at construction and run in full on
/// every transition.
///
/// Detector order doesn't affect the result — the output is a set, so two
/// detectors firing the same event on one transition simply coalesce (§4.1)
/// — but is kept for introspection (`detector_names`).
pub struct LabellingFunction<O, A> {
    names: Vec<String>,
    detectors: Vec<Detector<O, A>>,
}

impl<O, A> LabellingFunction<O, A> {
    /// Register a bank of `(name, detector)` pairs once, at construction.
    pub fn new(detectors: Vec<(impl Into<String>, Detector<O, A>)>) -> Self {
        let mut names = Vec::with_capacity(detectors.len());
        let mut fns = Vec::with_capacity(detectors.len());
        for (name, detector) in detectors {
            names.push(name.into());
            fns.push(detector);
        }
        Self {
            names,
            detectors: fns,
        }
    }

    pub fn detector_names(&self) -> &[String] {
        &self.names
    }

    /// Run every detector over `(o, a, o')` and return the union of events
    /// that fired.
    pub fn label(&self, o: &O, a: &A, o_next: &O) -> EventSet {
        let mut set = EventSet::EMPTY;
        for detector in &self.detectors {
            if let Some(event) = detector(o, a, o_next) {
                set.insert(event);
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::Alphabet;

    #[test]
    fn unions_firing_detectors() {
        let alphabet = Alphabet::new(["A", "B"]).unwrap();
        let a = alphabet.event("A").unwrap();
        let b = alphabet.event("B").unwrap();

        let lf: LabellingFunction<i32, ()> = LabellingFunction::new(vec![
            (
                "fires-a-on-even",
                Box::new(move |o: &i32, _a: &(), _o2: &i32| (*o % 2 == 0).then_some(a))
                    as Detector<i32, ()>,
            ),
            (
                "fires-b-on-positive",
                Box::new(move |o: &i32, _a: &(), _o2: &i32| (*o > 0).then_some(b))
                    as Detector<i32, ()>,
            ),
        ]);

        let events = lf.label(&2, &(), &3);
        assert!(events.contains(a));
        assert!(events.contains(b));
    }

    #[test]
    fn no_detector_firing_yields_empty_set() {
        let lf: LabellingFunction<i32, ()> = LabellingFunction::new(vec![(
            "never",
            Box::new(|_: &i32, _: &(), _: &i32| None) as Detector<i32, ()>,
        )]);
        assert!(lf.label(&0, &(), &0).is_empty());
    }

    #[test]
    fn duplicate_firings_coalesce() {
        let alphabet = Alphabet::new(["A"]).unwrap();
        let a = alphabet.event("A").unwrap();
        let lf: LabellingFunction<(), ()> = LabellingFunction::new(vec![
            ("one", Box::new(move |_: &(), _: &(), _: &()| Some(a)) as Detector<(), ()>),
            ("two", Box::new(move |_: &(), _: &(), _: &()| Some(a)) as Detector<(), ()>),
        ]);
        let events = lf.label(&(), &(), &());
        assert!(events.contains(a));
    }
}
