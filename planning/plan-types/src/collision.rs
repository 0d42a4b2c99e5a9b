//! Collision query request and result types.
//!
//! These types form the contract between cost features and an external
//! collision engine. A feature fills in a [`CollisionRequest`], the engine
//! writes a [`CollisionResult`] describing whether the robot collides, how far
//! it is from contact, and the contacts it found.
//!
//! # Example
//!
//! ```
//! use plan_types::{CollisionRequest, CollisionResult, Contact};
//!
//! let request = CollisionRequest::new("manipulator")
//!     .with_distance(true)
//!     .with_max_contacts(1);
//!
//! let mut result = CollisionResult::default();
//! result.add_contact(Contact::new("link_4", "table", -0.02));
//!
//! assert!(result.collision);
//! assert_eq!(result.contact_count, 1);
//! assert_eq!(request.group_name, "manipulator");
//! ```

use std::collections::BTreeMap;

use nalgebra::{Point3, Vector3};

/// Parameters of a single collision query.
///
/// Built once when a feature is initialized and cloned per evaluation call
/// with the trajectory's group name substituted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CollisionRequest {
    /// Planning group whose links are checked. Empty means the whole robot.
    pub group_name: String,
    /// Whether to compute the minimum separation distance.
    pub distance: bool,
    /// Whether to compute cost sources.
    pub cost: bool,
    /// Whether to report contacts.
    pub contacts: bool,
    /// Maximum number of contacts reported overall.
    pub max_contacts: usize,
    /// Maximum number of contacts reported per colliding pair.
    pub max_contacts_per_pair: usize,
    /// Whether the engine should log details about the query.
    pub verbose: bool,
}

impl Default for CollisionRequest {
    fn default() -> Self {
        Self {
            group_name: String::new(),
            distance: false,
            cost: false,
            contacts: false,
            max_contacts: 1,
            max_contacts_per_pair: 1,
            verbose: false,
        }
    }
}

impl CollisionRequest {
    /// Creates a request for `group_name` with default settings.
    #[must_use]
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            ..Default::default()
        }
    }

    /// Creates the request used for distance-and-contact cost evaluation.
    ///
    /// Distance and contacts are enabled, cost sources are disabled, and a
    /// single contact is reported overall and per pair.
    #[must_use]
    pub fn distance_and_contacts(group_name: impl Into<String>) -> Self {
        Self::new(group_name)
            .with_distance(true)
            .with_cost(false)
            .with_contacts(true)
            .with_max_contacts(1)
            .with_max_contacts_per_pair(1)
            .with_verbose(false)
    }

    /// Returns a copy of this request targeting another group.
    #[must_use]
    pub fn for_group(&self, group_name: &str) -> Self {
        Self {
            group_name: group_name.to_owned(),
            ..self.clone()
        }
    }

    /// Sets whether distance is computed.
    #[must_use]
    pub const fn with_distance(mut self, distance: bool) -> Self {
        self.distance = distance;
        self
    }

    /// Sets whether cost sources are computed.
    #[must_use]
    pub const fn with_cost(mut self, cost: bool) -> Self {
        self.cost = cost;
        self
    }

    /// Sets whether contacts are reported.
    #[must_use]
    pub const fn with_contacts(mut self, contacts: bool) -> Self {
        self.contacts = contacts;
        self
    }

    /// Sets the maximum number of contacts overall.
    #[must_use]
    pub const fn with_max_contacts(mut self, max: usize) -> Self {
        self.max_contacts = max;
        self
    }

    /// Sets the maximum number of contacts per colliding pair.
    #[must_use]
    pub const fn with_max_contacts_per_pair(mut self, max: usize) -> Self {
        self.max_contacts_per_pair = max;
        self
    }

    /// Sets verbose engine logging.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// A single contact between two bodies.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Contact {
    /// Contact position in the planning frame.
    pub position: Point3<f64>,
    /// Contact normal, pointing from body 2 towards body 1.
    pub normal: Vector3<f64>,
    /// Penetration depth. Engines differ in sign convention.
    pub depth: f64,
    /// Name of the first body.
    pub body_name_1: String,
    /// Name of the second body.
    pub body_name_2: String,
}

impl Contact {
    /// Creates a contact between two named bodies at the origin.
    #[must_use]
    pub fn new(body_name_1: impl Into<String>, body_name_2: impl Into<String>, depth: f64) -> Self {
        Self {
            position: Point3::origin(),
            normal: Vector3::z(),
            depth,
            body_name_1: body_name_1.into(),
            body_name_2: body_name_2.into(),
        }
    }

    /// Sets the contact position.
    #[must_use]
    pub const fn with_position(mut self, position: Point3<f64>) -> Self {
        self.position = position;
        self
    }

    /// Sets the contact normal.
    #[must_use]
    pub const fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.normal = normal;
        self
    }

    /// Returns the penetration magnitude.
    #[must_use]
    pub fn penetration(&self) -> f64 {
        self.depth.abs()
    }
}

/// Contacts grouped by the pair of bodies involved, in a stable order.
pub type ContactMap = BTreeMap<(String, String), Vec<Contact>>;

/// Outcome of one collision query.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CollisionResult {
    /// Whether any collision was found.
    pub collision: bool,
    /// Minimum separation distance. Only meaningful when `collision` is
    /// `false`; engines that find no interaction may leave it at the
    /// [`CollisionResult::FAR`] sentinel.
    pub distance: f64,
    /// Total number of contacts stored in `contacts`.
    pub contact_count: usize,
    /// Contacts keyed by body pair.
    pub contacts: ContactMap,
}

impl Default for CollisionResult {
    fn default() -> Self {
        Self {
            collision: false,
            distance: Self::FAR,
            contact_count: 0,
            contacts: ContactMap::new(),
        }
    }
}

impl CollisionResult {
    /// Distance reported when nothing is close enough to be measured.
    pub const FAR: f64 = f64::MAX;

    /// Creates a collision-free result at the given distance.
    #[must_use]
    pub fn separated(distance: f64) -> Self {
        Self {
            distance,
            ..Default::default()
        }
    }

    /// Creates a colliding result holding the given contacts.
    #[must_use]
    pub fn colliding(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let mut result = Self::default();
        for contact in contacts {
            result.add_contact(contact);
        }
        result.collision = true;
        result
    }

    /// Resets the result so the buffer can be reused for another query.
    pub fn clear(&mut self) {
        self.collision = false;
        self.distance = Self::FAR;
        self.contact_count = 0;
        self.contacts.clear();
    }

    /// Records a contact and marks the result as colliding.
    pub fn add_contact(&mut self, contact: Contact) {
        let key = (contact.body_name_1.clone(), contact.body_name_2.clone());
        self.contacts.entry(key).or_default().push(contact);
        self.contact_count += 1;
        self.collision = true;
    }

    /// Iterates over every contact in pair order.
    pub fn iter_contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.values().flatten()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_contacts_request() {
        let request = CollisionRequest::distance_and_contacts("arm");
        assert_eq!(request.group_name, "arm");
        assert!(request.distance);
        assert!(!request.cost);
        assert!(request.contacts);
        assert_eq!(request.max_contacts, 1);
        assert_eq!(request.max_contacts_per_pair, 1);
        assert!(!request.verbose);
    }

    #[test]
    fn test_for_group_keeps_settings() {
        let template = CollisionRequest::distance_and_contacts("");
        let request = template.for_group("gripper");
        assert_eq!(request.group_name, "gripper");
        assert_eq!(
            CollisionRequest {
                group_name: String::new(),
                ..request
            },
            template
        );
    }

    #[test]
    fn test_default_result_is_far() {
        let result = CollisionResult::default();
        assert!(!result.collision);
        assert_eq!(result.distance, CollisionResult::FAR);
        assert_eq!(result.iter_contacts().count(), 0);
    }

    #[test]
    fn test_add_contact_groups_by_pair() {
        let mut result = CollisionResult::default();
        result.add_contact(Contact::new("a", "b", 0.1));
        result.add_contact(Contact::new("a", "b", 0.2));
        result.add_contact(Contact::new("a", "c", 0.3));

        assert!(result.collision);
        assert_eq!(result.contact_count, 3);
        assert_eq!(result.contacts.len(), 2);
        assert_eq!(result.contacts[&("a".into(), "b".into())].len(), 2);
    }

    #[test]
    fn test_iter_contacts_pair_order() {
        let result = CollisionResult::colliding([
            Contact::new("z", "y", 0.5),
            Contact::new("a", "b", 0.1),
        ]);
        let depths: Vec<f64> = result.iter_contacts().map(|c| c.depth).collect();
        assert_eq!(depths, vec![0.1, 0.5]);
    }

    #[test]
    fn test_clear() {
        let mut result = CollisionResult::colliding([Contact::new("a", "b", 0.1)]);
        result.clear();
        assert_eq!(result, CollisionResult::default());
    }

    #[test]
    fn test_penetration_is_absolute() {
        assert_eq!(Contact::new("a", "b", -0.03).penetration(), 0.03);
    }
}
