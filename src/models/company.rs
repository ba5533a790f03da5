use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// A company record from the `companies` collection.
///
/// The collection has no enforced schema, so every field tolerates being
/// missing or `null` and falls back to its empty/zero value. Fields outside
/// the modelled ones are kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "object_id_as_hex"
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub headcount: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub benefits: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hiring_criteria: HiringCriteria,
    #[serde(default, deserialize_with = "null_as_default")]
    pub salary_band: SalaryBand,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Document,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HiringCriteria {
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Document,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalaryBand {
    #[serde(
        default,
        deserialize_with = "lenient::float",
        serialize_with = "lenient::whole_as_integer"
    )]
    pub base: f64,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Document,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    /// Number of companies matching the filter
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn object_id_as_hex<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(id) => serializer.serialize_str(&id.to_hex()),
        None => serializer.serialize_none(),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numeric fields are stored as int32, int64 or double depending on who wrote
/// the document. Accept any of them, plus `null` and numeric strings.
mod lenient {
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    struct NumberVisitor;

    enum Number {
        Int(i64),
        Float(f64),
    }

    impl<'de> Visitor<'de> for NumberVisitor {
        type Value = Number;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or null")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Number, E> {
            Ok(Number::Int(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Number, E> {
            Ok(Number::Int(i64::try_from(v).unwrap_or(i64::MAX)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Number, E> {
            Ok(Number::Float(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Number, E> {
            let v = v.trim();
            if let Ok(i) = v.parse::<i64>() {
                return Ok(Number::Int(i));
            }
            Ok(Number::Float(v.parse::<f64>().unwrap_or(0.0)))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Number, E> {
            Ok(Number::Int(0))
        }

        fn visit_none<E: de::Error>(self) -> Result<Number, E> {
            Ok(Number::Int(0))
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Number, D::Error> {
            deserializer.deserialize_any(NumberVisitor)
        }
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Ok(match deserializer.deserialize_any(NumberVisitor)? {
            Number::Int(i) => i,
            Number::Float(f) => f as i64,
        })
    }

    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(match deserializer.deserialize_any(NumberVisitor)? {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        })
    }

    /// Write whole values as JSON integers (`4500000`, not `4500000.0`).
    pub fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        const I64_RANGE: f64 = 9_223_372_036_854_775_808.0;

        if value.fract() == 0.0 && value.abs() < I64_RANGE {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }
}
