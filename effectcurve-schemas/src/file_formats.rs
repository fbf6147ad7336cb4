use crate::{day::Day, dose::DoseEvent};
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt;

/// The saved-days file: a JSON object mapping day names to lists of
/// `[amount, "HH:MM"]` pairs.
///
/// Day order is the file's key order and is preserved on save. A repeated
/// key replaces the earlier entry's doses but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaysFile {
    pub days: Vec<Day>,
}

impl Serialize for DaysFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for day in &self.days {
            map.serialize_entry(&day.name, &day.doses)?;
        }
        map.end()
    }
}

struct DaysFileVisitor;

impl<'de> Visitor<'de> for DaysFileVisitor {
    type Value = DaysFile;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of day names to dose lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut days: Vec<Day> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, doses)) = access.next_entry::<String, Vec<DoseEvent>>()? {
            match days.iter_mut().find(|d| d.name == name) {
                Some(existing) => existing.doses = doses,
                None => days.push(Day { name, doses }),
            }
        }
        Ok(DaysFile { days })
    }
}

impl<'de> Deserialize<'de> for DaysFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DaysFileVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_key_order() {
        let json = r#"{"Day 10": [[40.0, "08:00"]], "Day 2": [], "Day 1": [[20.0, "12:30"]]}"#;
        let file: DaysFile = serde_json::from_str(json).unwrap();
        let names: Vec<_> = file.days.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Day 10", "Day 2", "Day 1"]);

        let written = serde_json::to_string(&file).unwrap();
        assert_eq!(
            written,
            r#"{"Day 10":[[40.0,"08:00"]],"Day 2":[],"Day 1":[[20.0,"12:30"]]}"#
        );
    }

    #[test]
    fn test_repeated_key_keeps_first_position() {
        let json = r#"{"Day 1": [[40.0, "08:00"]], "Day 2": [], "Day 1": [[10.0, "09:00"]]}"#;
        let file: DaysFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.days.len(), 2);
        assert_eq!(file.days[0].name, "Day 1");
        assert_eq!(file.days[0].doses[0].amount_mg, 10.0);
    }

    #[test]
    fn test_rejects_non_object() {
        let result: Result<DaysFile, _> = serde_json::from_str(r#"[["Day 1", []]]"#);
        assert!(result.is_err());
    }
}
