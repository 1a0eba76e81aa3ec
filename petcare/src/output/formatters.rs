use std::fmt::Display;

use crate::error::{Error, Result};

use super::{OutputFormatter, RecordView};

/// Formatter producing pretty-printed JSON.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, record: &RecordView) -> Result<String> {
        serde_json::to_string_pretty(record).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}

/// Formatter producing aligned `key: value` lines.
pub struct HumanFormatter;

fn optional(value: Option<&String>) -> &str {
    value.map_or("-", String::as_str)
}

struct Lines(Vec<(String, String)>);

impl Lines {
    fn new(title: impl Display) -> Self {
        Self(vec![(title.to_string(), String::new())])
    }

    fn field(mut self, key: &str, value: impl Display) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    fn render(self) -> String {
        let mut rows = self.0.into_iter();
        let mut out = rows.next().map(|(title, _)| title).unwrap_or_default();
        let rows: Vec<_> = rows.collect();
        let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in rows {
            out.push_str(&format!("\n  {key:<width$}  {value}"));
        }
        out
    }
}

impl OutputFormatter for HumanFormatter {
    fn format(&self, record: &RecordView) -> Result<String> {
        let lines = match record {
            RecordView::Appointment(a) => Lines::new(a.id)
                .field("status", a.status)
                .field("pet", a.pet)
                .field("veterinarian", a.vet)
                .field("when", format!("{} {}", a.date, a.time.format("%H:%M")))
                .field("reason", optional(a.reason.as_ref()))
                .field("booked", a.created_at.format("%Y-%m-%d %H:%M UTC")),
            RecordView::Booking(b) => Lines::new(b.id)
                .field("status", b.status)
                .field("pet", b.pet)
                .field("sitter", b.sitter)
                .field("dates", format!("{} to {}", b.start_date, b.end_date))
                .field("hours", b.total_hours)
                .field("fee", b.total_fee)
                .field("requests", optional(b.special_requests.as_ref()))
                .field("booked", b.created_at.format("%Y-%m-%d %H:%M UTC")),
            RecordView::Order(o) => {
                let mut lines = Lines::new(o.id)
                    .field("status", o.status)
                    .field("buyer", o.buyer)
                    .field("shop", o.shop)
                    .field("total", o.total_amount)
                    .field("ship to", &o.shipping_address)
                    .field("placed", o.created_at.format("%Y-%m-%d %H:%M UTC"));
                for (n, item) in o.items.iter().enumerate() {
                    lines = lines.field(
                        &format!("line {}", n + 1),
                        format!("{} x{} @ {}", item.product, item.quantity, item.unit_price),
                    );
                }
                lines
            }
            RecordView::MedicalRecord(m) => Lines::new(m.id)
                .field("appointment", m.appointment)
                .field("pet", m.pet)
                .field("veterinarian", m.vet)
                .field("diagnosis", &m.diagnosis)
                .field("treatment", optional(m.treatment.as_ref()))
                .field("prescription", optional(m.prescription.as_ref()))
                .field("notes", optional(m.notes.as_ref()))
                .field("written", m.created_at.format("%Y-%m-%d %H:%M UTC")),
        };
        Ok(lines.render())
    }
}
