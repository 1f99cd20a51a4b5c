use serde::{Deserialize, Serialize};

/// Card as exposed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub name: String,
}

/// Product as exposed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
}

/// What `POST /products/{id}/cards` asks for.
///
/// Decided while deserializing: a non-zero `id` attaches that card, a missing,
/// `null` or `0` id creates a card from `name`. An `id` that is present but not
/// an integer is a decode error, never a create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "AttachCardBody")]
pub enum AttachCard {
    Existing { id: i64 },
    New { name: String },
}

/// Wire shape of the attach payload before the create/attach decision.
#[derive(Debug, Deserialize)]
pub struct AttachCardBody {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<AttachCardBody> for AttachCard {
    type Error = String;

    fn try_from(body: AttachCardBody) -> Result<Self, Self::Error> {
        match (body.id, body.name) {
            (Some(id), _) if id != 0 => Ok(Self::Existing { id }),
            (_, Some(name)) => Ok(Self::New { name }),
            (_, None) => Err("either a non-zero card id or a name is required".to_string()),
        }
    }
}

/// Rename or create payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameInput {
    pub name: String,
}

impl From<models::card::Model> for Card {
    fn from(m: models::card::Model) -> Self { Self { id: m.id, name: m.name } }
}

impl From<models::product::Model> for Product {
    fn from(m: models::product::Model) -> Self { Self { id: m.id, name: m.name } }
}

#[cfg(test)]
mod tests {
    use super::AttachCard;
    use serde_json::json;

    fn parse(v: serde_json::Value) -> Result<AttachCard, serde_json::Error> {
        serde_json::from_value(v)
    }

    #[test]
    fn id_selects_existing_card() {
        assert_eq!(parse(json!({"id": 3})).unwrap(), AttachCard::Existing { id: 3 });
        assert_eq!(parse(json!({"id": 3, "name": "ignored"})).unwrap(), AttachCard::Existing { id: 3 });
    }

    #[test]
    fn missing_null_or_zero_id_creates() {
        let gold = AttachCard::New { name: "Gold".into() };
        assert_eq!(parse(json!({"name": "Gold"})).unwrap(), gold);
        assert_eq!(parse(json!({"id": null, "name": "Gold"})).unwrap(), gold);
        assert_eq!(parse(json!({"id": 0, "name": "Gold"})).unwrap(), gold);
    }

    #[test]
    fn non_integer_id_is_rejected() {
        assert!(parse(json!({"id": "7", "name": "Gold"})).is_err());
        assert!(parse(json!({"id": 7.5, "name": "Gold"})).is_err());
        assert!(parse(json!({"id": true})).is_err());
    }

    #[test]
    fn body_needs_an_id_or_a_name() {
        assert!(parse(json!({})).is_err());
        assert!(parse(json!({"id": 0})).is_err());
        assert!(parse(json!({"id": null})).is_err());
    }
}
