use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Column headers in display order.
pub const COLUMNS: [&str; 7] = [
    "Player Name",
    "Class & Race",
    "HP",
    "AC",
    "Inventory",
    "Conditions",
    "Status",
];

/// One row of the remote roster sheet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RosterRow {
    #[serde(rename = "Player Name", default, deserialize_with = "cell_text")]
    pub player_name: String,
    #[serde(rename = "Class & Race", default, deserialize_with = "cell_text")]
    pub class_race: String,
    #[serde(rename = "HP", default, deserialize_with = "cell_text")]
    pub hp: String,
    #[serde(rename = "AC", default, deserialize_with = "cell_text")]
    pub ac: String,
    #[serde(rename = "Inventory", default, deserialize_with = "cell_text")]
    pub inventory: String,
    #[serde(rename = "Conditions", default, deserialize_with = "cell_text")]
    pub conditions: String,
    #[serde(rename = "Status", default, deserialize_with = "cell_text")]
    pub status: String,
}

impl RosterRow {
    pub fn cells(&self) -> [&str; 7] {
        [
            self.player_name.as_str(),
            self.class_race.as_str(),
            self.hp.as_str(),
            self.ac.as_str(),
            self.inventory.as_str(),
            self.conditions.as_str(),
            self.status.as_str(),
        ]
    }
}

// Sheets hand back numbers for numeric-looking cells.
fn cell_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Builds the `<tr>` rows for the character table. Cell values are inserted
/// as-is.
pub fn render_table(rows: &[RosterRow]) -> String {
    let mut html = String::new();

    html.push_str("\n<tr>\n");
    for col in COLUMNS {
        html.push_str(&format!("    <th>{}</th>\n", col));
    }
    html.push_str("</tr>");

    for row in rows {
        html.push_str("\n<tr>\n");
        for cell in row.cells() {
            html.push_str(&format!("    <td>{}</td>\n", cell));
        }
        html.push_str("</tr>");
    }

    html
}
