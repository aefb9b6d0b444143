use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope returned by the processing endpoint. `resultats` and `data` are
/// kept as raw JSON so they can be handed to the dashboard unchanged.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UploadEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub resultats: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body the processing endpoint sends on non-2xx answers.
#[derive(Debug, Deserialize)]
pub struct UpstreamErrorBody {
    pub error: Option<String>,
}

/// Both storage keys, ready to be written into the session.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPayload {
    pub resultats: String,
    pub data: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct GroupIndices {
    #[serde(default)]
    pub homme: Option<f64>,
    #[serde(default)]
    pub femme: Option<f64>,
    #[serde(default)]
    pub ensemble: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct IcnuIndices {
    #[serde(default)]
    pub indice_a: Option<f64>,
    #[serde(default)]
    pub indice_b: Option<f64>,
    #[serde(default)]
    pub indice_c: Option<f64>,
    #[serde(default)]
    pub icnu: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Resultats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub whipple: GroupIndices,
    #[serde(default, deserialize_with = "null_as_default")]
    pub myers: GroupIndices,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bachi: GroupIndices,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icnu: IcnuIndices,
}

/// One age row. Extra columns such as `Ensemble` are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopulationRow {
    #[serde(rename = "Age", default)]
    pub age: Value,
    #[serde(rename = "Homme", default)]
    pub homme: Option<f64>,
    #[serde(rename = "Femme", default)]
    pub femme: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
