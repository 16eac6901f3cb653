//! Resource table grouped by category

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A titled link surfaced with answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ResourceEntry {
    pub title: &'static str,
    pub url: &'static str,
}

/// A category of links and the terms that select it
#[derive(Debug)]
pub struct ResourceCategory {
    pub key: &'static str,
    /// Lower-case terms that select this category
    pub triggers: &'static [&'static str],
    pub entries: &'static [ResourceEntry],
}

/// Ordered set of categories
#[derive(Debug)]
pub struct ResourceCatalog {
    pub categories: &'static [ResourceCategory],
}

// Serialized as `{ "<category>": [entries...] }` in table order.
impl Serialize for ResourceCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in self.categories {
            map.serialize_entry(category.key, category.entries)?;
        }
        map.end()
    }
}

/// Faculty resources
pub static CATALOG: ResourceCatalog = ResourceCatalog {
    categories: &[
        ResourceCategory {
            key: "admission",
            triggers: &["สมัคร", "รับเข้า", "apply", "admission", "admissions"],
            entries: &[
                ResourceEntry {
                    title: "ระบบรับสมัครนักศึกษา",
                    url: "https://www.admissions.kku.ac.th",
                },
                ResourceEntry {
                    title: "เว็บไซต์คณะวิศวกรรมศาสตร์",
                    url: "https://www.en.kku.ac.th",
                },
            ],
        },
        ResourceCategory {
            key: "tuition",
            triggers: &["ค่าเทอม", "ค่าธรรมเนียม", "tuition", "fee", "fees"],
            entries: &[ResourceEntry {
                title: "ค่าธรรมเนียมการศึกษาปริญญาตรี",
                url: "https://www.en.kku.ac.th/web/tuition-fees",
            }],
        },
        ResourceCategory {
            key: "curriculum",
            triggers: &["หลักสูตร", "วิชา", "curriculum", "subject", "subjects"],
            entries: &[ResourceEntry {
                title: "หลักสูตรวิศวกรรมศาสตร์",
                url: "https://www.en.kku.ac.th/web/curriculum",
            }],
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_category_map() {
        let value = serde_json::to_value(&CATALOG).unwrap();
        let admission = value["admission"].as_array().unwrap();
        assert_eq!(admission.len(), 2);
        assert_eq!(admission[0]["url"], "https://www.admissions.kku.ac.th");
        assert_eq!(
            value["tuition"][0]["url"],
            "https://www.en.kku.ac.th/web/tuition-fees"
        );
        assert_eq!(value["curriculum"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_triggers_are_lower_case() {
        for category in CATALOG.categories {
            for trigger in category.triggers {
                assert_eq!(*trigger, trigger.to_lowercase());
            }
        }
    }
}
