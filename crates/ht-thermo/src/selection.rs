//! Run-time selection tables: model type tag to constructor.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, warn};

use crate::error::{ThermoError, ThermoResult};
use crate::region::Region;

/// Builds one model of a family on `region` for a phase.
pub type Constructor<M> = fn(&Region, &str) -> ThermoResult<Box<M>>;

/// Tag-to-constructor table for one model family.
///
/// Tables are filled once and read many times. Registration is idempotent:
/// the first constructor added for a tag stays, later ones are ignored.
pub struct SelectionTable<M: ?Sized> {
    family: &'static str,
    entries: RwLock<BTreeMap<String, Constructor<M>>>,
}

impl<M: ?Sized> SelectionTable<M> {
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Table pre-filled with `entries`.
    pub fn with_entries(
        family: &'static str,
        entries: impl IntoIterator<Item = (&'static str, Constructor<M>)>,
    ) -> Self {
        let table = Self::new(family);
        for (tag, ctor) in entries {
            table.add(tag, ctor);
        }
        table
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Register `ctor` under `tag`. Returns `false` if the tag was already taken.
    pub fn add(&self, tag: &str, ctor: Constructor<M>) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(tag) {
            warn!(family = self.family, tag, "duplicate registration ignored");
            return false;
        }
        entries.insert(tag.to_string(), ctor);
        debug!(family = self.family, tag, "registered model");
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Constructor for `tag`, or `UnknownModelTag` listing the registered tags.
    pub fn lookup(&self, tag: &str) -> ThermoResult<Constructor<M>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(tag)
            .copied()
            .ok_or_else(|| ThermoError::UnknownModelTag {
                family: self.family,
                tag: tag.to_string(),
                available: entries.keys().cloned().collect(),
            })
    }

    /// Look up `tag` and build a model with it.
    ///
    /// The table lock is released before the constructor runs.
    pub fn construct(&self, tag: &str, region: &Region, phase: &str) -> ThermoResult<Box<M>> {
        let ctor = self.lookup(tag)?;
        ctor(region, phase)
    }
}

impl<M: ?Sized> std::fmt::Debug for SelectionTable<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionTable")
            .field("family", &self.family)
            .field("tags", &self.tags())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ht_config::CaseConfig;
    use ht_mesh::MeshBuilder;

    trait Named {
        fn name(&self) -> &'static str;
    }

    struct A;
    struct B;

    impl Named for A {
        fn name(&self) -> &'static str {
            "a"
        }
    }

    impl Named for B {
        fn name(&self) -> &'static str {
            "b"
        }
    }

    fn make_a(_: &Region, _: &str) -> ThermoResult<Box<dyn Named>> {
        Ok(Box::new(A))
    }

    fn make_b(_: &Region, _: &str) -> ThermoResult<Box<dyn Named>> {
        Ok(Box::new(B))
    }

    fn region() -> Region {
        Region::new(
            MeshBuilder::uniform(1, 1.0).build().unwrap(),
            CaseConfig::new("selection"),
        )
    }

    #[test]
    fn first_registration_wins() {
        let table = SelectionTable::<dyn Named>::new("named");
        assert!(table.add("x", make_a));
        assert!(!table.add("x", make_b));
        let model = table.construct("x", &region(), "").unwrap();
        assert_eq!(model.name(), "a");
    }

    #[test]
    fn unknown_tag_lists_registered_tags() {
        let entries: [(&'static str, Constructor<dyn Named>); 2] = [("b", make_b), ("a", make_a)];
        let table = SelectionTable::with_entries("named", entries);
        assert_eq!(table.tags(), vec!["a", "b"]);
        match table.construct("c", &region(), "") {
            Err(ThermoError::UnknownModelTag {
                family,
                tag,
                available,
            }) => {
                assert_eq!(family, "named");
                assert_eq!(tag, "c");
                assert_eq!(available, vec!["a", "b"]);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("unknown tag constructed a model"),
        }
    }
}
