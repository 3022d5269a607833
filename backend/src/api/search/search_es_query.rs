//! Query DSL builders for dataset search.

use chrono::{DateTime, SecondsFormat, Utc};
use common::{facet::FacetType, region::Region, search_const::MATCH_ALL_TEXT, search_query::SearchQuery, search_result::SearchStrategy};
use regex::RegexBuilder;
use serde_json::{Value, json};

use crate::api::search::facet_definition::facet_definition;
use crate::config::IndexNames;

pub struct FieldDef {
    pub path: &'static str,
    pub boost: Option<u32>,
}

impl FieldDef {
    const fn new(path: &'static str) -> Self {
        Self { path, boost: None }
    }

    const fn boosted(path: &'static str, boost: u32) -> Self {
        Self { path, boost: Some(boost) }
    }

    fn to_es(&self) -> String {
        match self.boost {
            Some(boost) => format!("{}^{}", self.path, boost),
            None => self.path.to_string(),
        }
    }
}

/// Fields analyzed with language rules (stemming, stop words).
pub const DATASETS_LANGUAGE_FIELDS: &[FieldDef] = &[
    FieldDef::boosted("title", 50),
    FieldDef::boosted("description", 2),
    FieldDef::new("publisher.name"),
    FieldDef::boosted("keywords", 10),
    FieldDef::new("themes"),
];

/// Fields tokenized without language analysis.
pub const NON_LANGUAGE_FIELDS: &[FieldDef] = &[
    FieldDef::new("_id"),
    FieldDef::new("catalog"),
    FieldDef::new("accrualPeriodicity"),
    FieldDef::new("contactPoint.identifier"),
    FieldDef::new("publisher.acronym"),
];

pub const DISTRIBUTION_FIELDS: &[&str] = &["distributions.title", "distributions.description", "distributions.format"];

pub const SPATIAL_FIELD: &str = "spatial.geoJson";
pub const TEMPORAL_START_FIELD: &str = "temporal.start.date";
pub const TEMPORAL_END_FIELD: &str = "temporal.end.date";

const MATCH_PART_MINIMUM_SHOULD_MATCH: &str = "-50%";

fn sanitise_text(text: &str) -> &str {
    let text = text.trim();
    if text.is_empty() { MATCH_ALL_TEXT } else { text }
}

fn simple_query_string(text: &str, fields: Vec<String>, strategy: SearchStrategy, quote_suffix: bool) -> Value {
    let mut query = json!({
        "query": text,
        "fields": fields,
        "default_operator": "and",
    });
    if quote_suffix {
        query["quote_field_suffix"] = json!(".quote");
    }
    if strategy == SearchStrategy::MatchPart {
        query["default_operator"] = json!("or");
        query["minimum_should_match"] = json!(MATCH_PART_MINIMUM_SHOULD_MATCH);
    }
    json!({ "simple_query_string": query })
}

/// Lexical ranking query over dataset fields and nested distributions.
pub fn text_query(text: &str, strategy: SearchStrategy) -> Value {
    let text = sanitise_text(text);
    let to_es = |fields: &[FieldDef]| fields.iter().map(FieldDef::to_es).collect::<Vec<_>>();

    // language and non-language fields use different search analyzers and
    // cannot share one simple_query_string.
    let dataset_fields_query = json!({
        "bool": {
            "should": [
                simple_query_string(text, to_es(DATASETS_LANGUAGE_FIELDS), strategy, true),
                simple_query_string(text, to_es(NON_LANGUAGE_FIELDS), strategy, true),
            ],
            "minimum_should_match": 1,
        }
    });

    // language analysis only applies to nested objects through a nested query
    let distributions_query = json!({
        "nested": {
            "path": "distributions",
            "score_mode": "max",
            "query": simple_query_string(
                text,
                DISTRIBUTION_FIELDS.iter().map(|field| field.to_string()).collect(),
                strategy,
                false,
            ),
        }
    });

    json!({
        "dis_max": {
            "tie_breaker": 0,
            "queries": [dataset_fields_query, distributions_query],
        }
    })
}

/// Removes every boost region name from `text`, longest names first,
/// ignoring case and word boundaries.
pub fn strip_region_names(text: &str, regions: &[Region]) -> String {
    let mut stripped = text.to_string();
    for name in names_longest_first(regions) {
        let Ok(pattern) = RegexBuilder::new(&regex::escape(name)).case_insensitive(true).build() else {
            tracing::warn!(%name, "skipping region name that cannot be matched");
            continue;
        };
        stripped = pattern.replace_all(&stripped, "").into_owned();
    }
    stripped.trim().to_string()
}

/// Text query that also scores datasets inside the regions named in the text.
pub fn region_aware_text_query(text: &str, boost_regions: &[Region], strategy: SearchStrategy, indices: &IndexNames) -> Value {
    let text = sanitise_text(text);
    let full_text_query = text_query(text, strategy);
    if boost_regions.is_empty() {
        return full_text_query;
    }

    let text_without_regions = strip_region_names(text, boost_regions);
    let mut must = vec![text_query(&text_without_regions, strategy)];
    must.extend(boost_region_geo_queries(boost_regions, indices));

    json!({
        "bool": {
            "should": [
                full_text_query,
                { "bool": { "must": must } },
            ],
            "minimum_should_match": 1,
        }
    })
}

/// Distinct region names, longest first, ties in lexical order.
fn names_longest_first(regions: &[Region]) -> Vec<&str> {
    let mut names = regions.iter().flat_map(Region::names).collect::<Vec<_>>();
    names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
    names.dedup();
    names
}

/// Tests the dataset's spatial extent against a stored region geometry.
pub fn region_geo_shape_query(region_document_id: &str, indices: &IndexNames) -> Value {
    json!({
        "geo_shape": {
            SPATIAL_FIELD: {
                "indexed_shape": {
                    "index": indices.regions,
                    "type": "regions",
                    "id": region_document_id,
                    "path": "geometry",
                }
            }
        }
    })
}

/// Region geometries are keyed by `"{type}/{id}"`, the same id explicit
/// filters reference; `regionSearchId` is only the text lookup key.
fn boost_region_geo_queries(boost_regions: &[Region], indices: &IndexNames) -> Vec<Value> {
    boost_regions.iter().map(|region| region_geo_shape_query(&region.document_id(), indices)).collect()
}

#[derive(Debug, Clone, Copy)]
pub enum DateBound {
    From,
    To,
}

/// Matches datasets whose temporal start or end falls within the bound.
pub fn date_query(date: &DateTime<Utc>, bound: DateBound) -> Value {
    let comparator = match bound {
        DateBound::From => "gte",
        DateBound::To => "lte",
    };
    let date = date.to_rfc3339_opts(SecondsFormat::Millis, true);
    json!({
        "bool": {
            "should": [
                { "range": { TEMPORAL_END_FIELD: { comparator: date } } },
                { "range": { TEMPORAL_START_FIELD: { comparator: date } } },
            ],
            "minimum_should_match": 1,
        }
    })
}

fn facet_filter_query<'a>(facet_type: FacetType, values: impl IntoIterator<Item = &'a String>, indices: &IndexNames) -> Option<Value> {
    let definition = facet_definition(facet_type);
    let should = values
        .into_iter()
        .map(|value| definition.exact_match_query(value, indices))
        .collect::<Vec<_>>();
    if should.is_empty() {
        return None;
    }
    Some(json!({ "bool": { "should": should, "minimum_should_match": 1 } }))
}

/// Every hard constraint of `query` AND-ed with its text fragment.
pub fn datasets_filter_query(query: &SearchQuery, boost_regions: &[Region], strategy: SearchStrategy, indices: &IndexNames) -> Value {
    let free_text = query.trimmed_free_text().unwrap_or(MATCH_ALL_TEXT);
    let mut must = vec![region_aware_text_query(free_text, boost_regions, strategy, indices)];

    must.extend(query.regions.iter().map(|region| region_geo_shape_query(&region.document_id(), indices)));
    if let Some(date_from) = &query.date_from {
        must.push(date_query(date_from, DateBound::From));
    }
    if let Some(date_to) = &query.date_to {
        must.push(date_query(date_to, DateBound::To));
    }
    must.extend(facet_filter_query(FacetType::Publisher, &query.publishers, indices));
    must.extend(facet_filter_query(FacetType::Format, &query.formats, indices));

    json!({ "bool": { "must": must } })
}

/// The scoring query sent for dataset search: hard constraints plus quality
/// and boost-region contributions summed together.
pub fn compose_datasets_query(query: &SearchQuery, boost_regions: &[Region], strategy: SearchStrategy, indices: &IndexNames) -> Value {
    let quality_factor = json!({
        "filter": { "term": { "hasQuality": true } },
        "field_value_factor": { "field": "quality", "missing": 1 },
    });

    let mut functions = vec![json!({ "weight": 1 }), quality_factor];
    if !boost_regions.is_empty() {
        functions.push(json!({
            "filter": { "bool": { "should": boost_region_geo_queries(boost_regions, indices) } },
            "weight": 1,
        }));
    }

    json!({
        "function_score": {
            "query": datasets_filter_query(query, boost_regions, strategy, indices),
            "functions": functions,
            "score_mode": "sum",
        }
    })
}
