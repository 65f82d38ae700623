//! Scripted host doubles shared by the integration harnesses.
#![allow(dead_code)]

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use layerseek::{
    Feature, FeatureId, FilterExpression, LayerRegistry, MapView, MessageSink, QueryError,
    RawField, Severity, VectorLayer,
};

// ---------------------------------------------------------------------------
// Fake layer
// ---------------------------------------------------------------------------

/// What a fake layer reports and returns, fixed per test.
pub struct LayerScript {
    pub id: String,
    pub name: String,
    pub fields: Vec<RawField>,
    pub geometry: Option<String>,
    pub provider: String,
    pub source: String,
    pub encoding: Option<String>,
    pub features: Vec<Feature>,
    pub parse_error: Option<String>,
}

impl Default for LayerScript {
    fn default() -> Self {
        Self {
            id: "layer-0".to_string(),
            name: "layer".to_string(),
            fields: Vec::new(),
            geometry: Some("Point".to_string()),
            provider: "ogr".to_string(),
            source: "/data/layer.shp".to_string(),
            encoding: Some("UTF-8".to_string()),
            features: Vec::new(),
            parse_error: None,
        }
    }
}

/// Everything the controller did to the layer.
#[derive(Default)]
pub struct LayerLog {
    pub queries: Vec<String>,
    pub selections: Vec<Vec<FeatureId>>,
    pub clears: usize,
}

#[derive(Clone)]
pub struct FakeLayer {
    script: Rc<LayerScript>,
    log: Rc<RefCell<LayerLog>>,
}

impl FakeLayer {
    pub fn new(script: LayerScript) -> Self {
        Self {
            script: Rc::new(script),
            log: Rc::new(RefCell::new(LayerLog::default())),
        }
    }

    /// Point vector layer with the given name and fields.
    pub fn vector(name: &str, fields: Vec<RawField>) -> Self {
        Self::new(LayerScript {
            id: format!("{name}-id"),
            name: name.to_string(),
            fields,
            ..LayerScript::default()
        })
    }

    /// Layer whose handle is not vector-compatible.
    pub fn raster(name: &str) -> Self {
        Self::new(LayerScript {
            id: format!("{name}-id"),
            name: name.to_string(),
            geometry: None,
            ..LayerScript::default()
        })
    }

    pub fn log(&self) -> Ref<'_, LayerLog> {
        self.log.borrow()
    }
}

impl VectorLayer for FakeLayer {
    fn id(&self) -> String {
        self.script.id.clone()
    }

    fn name(&self) -> String {
        self.script.name.clone()
    }

    fn fields(&self) -> Vec<RawField> {
        self.script.fields.clone()
    }

    fn geometry(&self) -> Option<String> {
        self.script.geometry.clone()
    }

    fn provider_type(&self) -> String {
        self.script.provider.clone()
    }

    fn source(&self) -> String {
        self.script.source.clone()
    }

    fn encoding(&self) -> Option<String> {
        self.script.encoding.clone()
    }

    fn query(&self, expression: &FilterExpression) -> Result<Vec<Feature>, QueryError> {
        self.log
            .borrow_mut()
            .queries
            .push(expression.as_str().to_string());
        if let Some(message) = &self.script.parse_error {
            return Err(QueryError::Parse(message.clone()));
        }
        Ok(self.script.features.clone())
    }

    fn select(&self, ids: &[FeatureId]) {
        self.log.borrow_mut().selections.push(ids.to_vec());
    }

    fn clear_selection(&self) {
        self.log.borrow_mut().clears += 1;
    }
}

// ---------------------------------------------------------------------------
// Fake registry, view, and message sink
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeRegistry {
    pub layers: Vec<FakeLayer>,
}

impl FakeRegistry {
    pub fn with_layers(layers: Vec<FakeLayer>) -> Self {
        Self { layers }
    }
}

impl LayerRegistry for FakeRegistry {
    type Layer = FakeLayer;

    fn vector_layer_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.layers.iter().map(|l| l.name()).collect();
        names.sort_by_key(|name| name.to_lowercase());
        names
    }

    fn layer_by_name(&self, name: &str) -> Option<FakeLayer> {
        self.layers.iter().find(|l| l.name() == name).cloned()
    }

    fn layer_by_id(&self, id: &str) -> Option<FakeLayer> {
        self.layers.iter().find(|l| l.id() == id).cloned()
    }
}

#[derive(Default)]
pub struct FakeView {
    pub zoomed: RefCell<Vec<String>>,
}

impl MapView for FakeView {
    fn zoom_to_selected(&self, layer: &dyn VectorLayer) {
        self.zoomed.borrow_mut().push(layer.name());
    }
}

#[derive(Default)]
pub struct FakeSink {
    pub messages: RefCell<Vec<(Severity, String, String)>>,
}

impl FakeSink {
    /// Asserts exactly one notification was emitted and returns it.
    pub fn only(&self) -> (Severity, String, String) {
        let messages = self.messages.borrow();
        assert_eq!(messages.len(), 1, "expected exactly one message: {messages:?}");
        messages[0].clone()
    }
}

impl MessageSink for FakeSink {
    fn notify(&self, severity: Severity, title: &str, body: &str) {
        self.messages
            .borrow_mut()
            .push((severity, title.to_string(), body.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

pub fn feature(id: FeatureId, attributes: &[&str]) -> Feature {
    Feature {
        id,
        attributes: attributes.iter().map(|a| Some(a.to_string())).collect(),
    }
}

/// Schema with one string and one numeric field.
pub fn addr_id_fields() -> Vec<RawField> {
    vec![
        RawField::new("addr", "String"),
        RawField::new("id", "Integer"),
    ]
}
