use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct KafkaConfig {
    pub brokers: String,
    pub topic: String,
    pub group_id: String,
    /// Start every partition at its first offset instead of the committed one.
    pub from_beginning: bool,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        KafkaConfig {
            brokers: "localhost:9092".to_string(),
            topic: "tankerkoenig".to_string(),
            group_id: "fuelagg".to_string(),
            from_beginning: true,
        }
    }
}
