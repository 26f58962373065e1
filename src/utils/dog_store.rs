#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use feruca::Collator;
use serde::Serialize;
use uuid::Uuid;

// Records loaded when seeding is enabled.
const SEED_DOGS: [(&str, &str); 2] = [
    ("Comet", "Whippet"),
    ("Oscar", "German Shorthaired Pointer"),
];

// ***************************************************************************
//                                 Dog Record
// ***************************************************************************
/** A single dog record.  The id is assigned when the record is added to the
 * store and never changes afterwards.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dog {
    pub id: String,
    pub name: String,
    pub breed: String,
}

impl Dog {
    pub fn new(id: &str, name: &str, breed: &str) -> Self {
        Self {id: id.to_string(), name: name.to_string(), breed: breed.to_string()}
    }
}

// ***************************************************************************
//                                 Dog Store
// ***************************************************************************
/** In-memory record store keyed by dog id.  Each operation takes the lock
 * once, so operations are atomic individually but not as a group.
 */
#[derive(Debug, Default)]
pub struct DogStore {
    dogs: RwLock<HashMap<String, Dog>>,
}

impl DogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------------
    // seed:
    // ---------------------------------------------------------------------------
    /** Load the fixed startup records. */
    pub fn seed(&self) {
        for (name, breed) in SEED_DOGS {
            self.add(name, breed);
        }
    }

    /// Create a record with a freshly generated id.
    pub fn add(&self, name: &str, breed: &str) -> Dog {
        let dog = Dog::new(&Uuid::new_v4().to_string(), name, breed);
        self.write().insert(dog.id.clone(), dog.clone());
        dog
    }

    pub fn get(&self, id: &str) -> Option<Dog> {
        self.read().get(id).cloned()
    }

    /// Insert or fully replace the record at id.  Nothing is merged from a
    /// previous version of the record.
    pub fn put(&self, id: &str, name: &str, breed: &str) -> Dog {
        let dog = Dog::new(id, name, breed);
        self.write().insert(dog.id.clone(), dog.clone());
        dog
    }

    /// Remove the record if it exists.  Returns true if something was removed.
    pub fn delete(&self, id: &str) -> bool {
        self.write().remove(id).is_some()
    }

    // ---------------------------------------------------------------------------
    // list:
    // ---------------------------------------------------------------------------
    /** Return all records sorted by name in Unicode collation order.  Dogs
     * with identical names are ordered by id.
     */
    pub fn list(&self) -> Vec<Dog> {
        let mut dogs: Vec<Dog> = self.read().values().cloned().collect();
        let mut collator = Collator::default();
        dogs.sort_by(|a, b| compare_names(&mut collator, &a.name, &b.name).then_with(|| a.id.cmp(&b.id)));
        dogs
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panicking writer can't leave a map half updated, so poisoned locks
    // are simply recovered.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Dog>> {
        self.dogs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Dog>> {
        self.dogs.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// compare_names:
// ---------------------------------------------------------------------------
/** Compare names with the Unicode Collation Algorithm using the root (CLDR)
 * locale, so accented letters sort beside their base letters.  Names the
 * collator considers equal fall back to code point order.
 */
pub fn compare_names(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_generates_distinct_ids() {
        let store = DogStore::new();
        let a = store.add("Comet", "Whippet");
        let b = store.add("Comet", "Whippet");
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&a.id), Some(a));
    }

    #[test]
    fn get_unknown_is_none() {
        let store = DogStore::new();
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn put_replaces_without_merging() {
        let store = DogStore::new();
        let dog = store.add("Oscar", "German Shorthaired Pointer");
        let updated = store.put(&dog.id, "Oscar II", "");
        assert_eq!(updated, Dog::new(&dog.id, "Oscar II", ""));
        assert_eq!(store.get(&dog.id), Some(updated));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn put_unknown_id_inserts() {
        let store = DogStore::new();
        store.put("made-up", "Rex", "Mutt");
        assert_eq!(store.get("made-up").map(|d| d.name), Some("Rex".to_string()));
    }

    #[test]
    fn delete_is_idempotent() {
        let store = DogStore::new();
        let dog = store.add("Comet", "Whippet");
        assert!(store.delete(&dog.id));
        assert!(!store.delete(&dog.id));
        assert!(store.is_empty());
        assert!(store.list().iter().all(|d| d.id != dog.id));
    }

    #[test]
    fn list_is_sorted_by_name() {
        let store = DogStore::new();
        for name in ["oscar", "Comet", "birdie", "Zeus", "abby"] {
            store.add(name, "x");
        }
        let names: Vec<String> = store.list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["abby", "birdie", "Comet", "oscar", "Zeus"]);
        let mut collator = Collator::default();
        for pair in names.windows(2) {
            assert_ne!(compare_names(&mut collator, &pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn accented_names_sort_with_their_letters() {
        let store = DogStore::new();
        for name in ["Zeus", "Émile", "Ålfie", "Bella"] {
            store.add(name, "x");
        }
        let names: Vec<String> = store.list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Ålfie", "Bella", "Émile", "Zeus"]);
    }

    #[test]
    fn same_name_ordered_by_id() {
        let store = DogStore::new();
        store.put("b", "Rex", "Mutt");
        store.put("a", "Rex", "Boxer");
        let ids: Vec<String> = store.list().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn seed_loads_two_dogs() {
        let store = DogStore::new();
        store.seed();
        let names: Vec<String> = store.list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Comet", "Oscar"]);
    }
}
