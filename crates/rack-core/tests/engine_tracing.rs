//! Structured tracing emitted by the engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rack_core::{GridConfig, Item, SelectionEngine, Side};
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: Arc::clone(&events),
    });
    tracing::subscriber::with_default(subscriber, f);
    events.lock().unwrap().clone()
}

fn engine() -> SelectionEngine {
    SelectionEngine::from_items(
        [Item::new(0, "Medal of Honor"), Item::new(1, "Air Force Cross")],
        GridConfig::default(),
    )
    .unwrap()
}

#[test]
fn transfer_emits_structured_debug_event() {
    let mut engine = engine();
    let events = capture(|| {
        engine.transfer("Air Force Cross", Side::Catalog).unwrap();
    });

    let transfer = events
        .iter()
        .find(|event| event.fields.get("message").is_some_and(|m| m == "item transferred"))
        .expect("transfer event");
    assert_eq!(transfer.level, tracing::Level::DEBUG);
    assert_eq!(transfer.target, "rack.engine");
    assert_eq!(transfer.fields["name"], "Air Force Cross");
    assert_eq!(transfer.fields["from"], "catalog");
    assert_eq!(transfer.fields["to"], "selected");
    assert_eq!(transfer.fields["old_index"], "1");
    assert_eq!(transfer.fields["new_index"], "0");
}

#[test]
fn missing_item_emits_warning() {
    let mut engine = engine();
    let events = capture(|| {
        let _ = engine.transfer("Bronze Star", Side::Selected);
    });

    let warning = events
        .iter()
        .find(|event| event.level == tracing::Level::WARN)
        .expect("warning event");
    assert_eq!(warning.fields["name"], "Bronze Star");
    assert_eq!(warning.fields["from"], "selected");
}
