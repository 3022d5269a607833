//! A small catalog of datasets, regions and facet rows.

use std::sync::Arc;

use backend::{IndexNames, SearchQueryer};
use serde_json::{Value, json};

use super::in_memory_backend::InMemoryBackend;

pub const DATASETS: &str = "datasets";
pub const REGIONS: &str = "regions";
pub const PUBLISHERS: &str = "publishers";
pub const FORMATS: &str = "formats";

pub const BOM: &str = "Bureau of Meteorology";
pub const EPA_TAS: &str = "Tasmanian Environment Protection Authority";
pub const NSW_PLANNING: &str = "NSW Department of Planning";
pub const FINANCE: &str = "Department of Finance";

pub struct DatasetFixture {
    source: Value,
}

pub fn dataset(identifier: &str, title: &str) -> DatasetFixture {
    DatasetFixture {
        source: json!({
            "identifier": identifier,
            "title": title,
            "description": "",
            "keywords": [],
            "distributions": [],
        }),
    }
}

impl DatasetFixture {
    pub fn description(mut self, description: &str) -> Self {
        self.source["description"] = json!(description);
        self
    }

    pub fn publisher(mut self, name: &str, acronym: &str) -> Self {
        self.source["publisher"] = json!({ "name": name, "acronym": acronym });
        self
    }

    pub fn format(mut self, format: &str) -> Self {
        if let Some(distributions) = self.source["distributions"].as_array_mut() {
            distributions.push(json!({ "title": format!("{format} download"), "format": format }));
        }
        self
    }

    pub fn temporal(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        let mut temporal = json!({});
        if let Some(start) = start {
            temporal["start"] = json!({ "date": start });
        }
        if let Some(end) = end {
            temporal["end"] = json!({ "date": end });
        }
        self.source["temporal"] = temporal;
        self
    }

    pub fn point(mut self, lon: f64, lat: f64) -> Self {
        self.source["spatial"] = json!({ "geoJson": { "type": "Point", "coordinates": [lon, lat] } });
        self
    }

    pub fn envelope(mut self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        self.source["spatial"] = json!({ "geoJson": envelope(min_lon, min_lat, max_lon, max_lat) });
        self
    }

    pub fn quality(mut self, quality: f64) -> Self {
        self.source["hasQuality"] = json!(true);
        self.source["quality"] = json!(quality);
        self
    }

    pub fn build(self) -> Value {
        self.source
    }
}

fn envelope(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Value {
    json!({ "type": "envelope", "coordinates": [[min_lon, max_lat], [max_lon, min_lat]] })
}

pub fn region(region_type: &str, region_id: &str, name: &str, short_name: &str, bbox: [f64; 4]) -> (String, Value) {
    let document_id = format!("{region_type}/{region_id}");
    let source = json!({
        "regionType": region_type,
        "regionId": region_id,
        "regionSearchId": format!("{name} {short_name}"),
        "regionName": name,
        "regionShortName": short_name,
        "geometry": envelope(bbox[0], bbox[1], bbox[2], bbox[3]),
    });
    (document_id, source)
}

/// Five datasets across Tasmania, New South Wales and the whole country.
pub fn sample_catalog() -> InMemoryBackend {
    let backend = InMemoryBackend::new();

    for (id, source) in [
        region("STE", "6", "Tasmania", "TAS", [143.5, -43.7, 148.5, -39.5]),
        region("STE", "1", "New South Wales", "NSW", [141.0, -37.5, 153.6, -28.2]),
    ] {
        backend.insert(REGIONS, &id, source);
    }

    let datasets = [
        dataset("ds-1", "Water quality monitoring Hobart")
            .description("Water quality samples collected in the Derwent estuary")
            .publisher(EPA_TAS, "EPA")
            .format("CSV")
            .temporal(Some("2019-01-01"), Some("2019-12-31"))
            .point(147.3, -42.9)
            .quality(0.8),
        dataset("ds-2", "Sydney harbour water quality")
            .description("Monthly readings in Sydney Harbour")
            .publisher(NSW_PLANNING, "DPE")
            .format("CSV")
            .format("PDF")
            .temporal(None, Some("2020-06-01"))
            .point(151.2, -33.85),
        dataset("ds-3", "Rainfall observations")
            .description("Daily rainfall totals from weather stations")
            .publisher(BOM, "BoM")
            .format("CSV")
            .format("JSON")
            .temporal(Some("2021-03-01"), Some("2021-09-30"))
            .envelope(112.0, -44.0, 154.0, -10.0),
        dataset("ds-4", "Tasmanian forest cover")
            .description("Forest extent mapped from satellite imagery")
            .publisher(EPA_TAS, "EPA")
            .format("GeoJSON")
            .envelope(144.0, -43.0, 148.0, -40.5),
        dataset("ds-5", "Budget papers")
            .description("Commonwealth budget statements")
            .publisher(FINANCE, "DoF")
            .format("PDF")
            .temporal(Some("2018-07-01"), Some("2019-06-30")),
    ];
    for fixture in datasets {
        let source = fixture.build();
        let id = source["identifier"].as_str().unwrap_or_default().to_string();
        backend.insert(DATASETS, &id, source);
    }

    for (value, identifier, acronym) in [
        (BOM, "bom", "BoM"),
        (EPA_TAS, "epa-tas", "EPA"),
        (NSW_PLANNING, "nsw-planning", "DPE"),
        (FINANCE, "finance", "DoF"),
    ] {
        backend.insert(PUBLISHERS, identifier, json!({ "value": value, "identifier": identifier, "acronym": acronym }));
    }

    for format in ["CSV", "PDF", "JSON", "GeoJSON"] {
        backend.insert(FORMATS, format, json!({ "value": format }));
    }

    backend
}

pub fn test_indices() -> IndexNames {
    IndexNames {
        datasets: DATASETS.to_string(),
        regions: REGIONS.to_string(),
        publishers: PUBLISHERS.to_string(),
        formats: FORMATS.to_string(),
    }
}

pub fn sample_queryer() -> (Arc<InMemoryBackend>, SearchQueryer<InMemoryBackend>) {
    let backend = Arc::new(sample_catalog());
    let queryer = SearchQueryer::new(backend.clone(), test_indices());
    (backend, queryer)
}

/// Identifiers of the returned datasets, in result order.
pub fn dataset_ids(datasets: &[Value]) -> Vec<String> {
    datasets
        .iter()
        .filter_map(|dataset| dataset["identifier"].as_str())
        .map(str::to_string)
        .collect()
}

/// Every `simple_query_string` text in a request body.
pub fn query_strings(body: &Value) -> Vec<String> {
    let mut found = Vec::new();
    fn walk(value: &Value, found: &mut Vec<String>) {
        match value {
            Value::Object(fields) => {
                if let Some(text) = fields.get("simple_query_string").and_then(|query| query["query"].as_str()) {
                    found.push(text.to_string());
                }
                fields.values().for_each(|value| walk(value, found));
            }
            Value::Array(items) => items.iter().for_each(|item| walk(item, found)),
            _ => {}
        }
    }
    walk(body, &mut found);
    found
}
