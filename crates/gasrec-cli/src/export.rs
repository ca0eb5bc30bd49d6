//! GeoJSON export of map markers.

use std::path::Path;

use anyhow::Context;
use geojson::ser::serialize_geometry;
use geojson::{Feature, FeatureCollection};
use gasrec_core::{MapMarker, MapState, MarkerKind};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct MarkerFeature<'a> {
    kind: &'static str,
    rank: Option<usize>,
    emphasized: bool,
    title: &'a str,
    label: Option<&'a str>,
    info: &'a [String],
    #[serde(serialize_with = "serialize_geometry")]
    geometry: geo_types::Point<f64>,
}

impl<'a> From<&'a MapMarker> for MarkerFeature<'a> {
    fn from(marker: &'a MapMarker) -> Self {
        let (kind, rank, emphasized) = match marker.kind {
            MarkerKind::User => ("user", None, false),
            MarkerKind::Station { rank, emphasized } => ("station", Some(rank), emphasized),
        };
        Self {
            kind,
            rank,
            emphasized,
            title: &marker.title,
            label: marker.label.as_deref(),
            info: &marker.info,
            geometry: geo_types::Point::new(marker.position.longitude, marker.position.latitude),
        }
    }
}

pub(crate) fn to_feature_collection(map: &MapState) -> anyhow::Result<FeatureCollection> {
    let features = map
        .markers()
        .iter()
        .map(|m| geojson::ser::to_feature(MarkerFeature::from(m)))
        .collect::<Result<Vec<Feature>, geojson::Error>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

pub(crate) fn write_geojson(map: &MapState, path: &Path) -> anyhow::Result<()> {
    let collection = to_feature_collection(map)?;
    std::fs::write(path, collection.to_string())
        .with_context(|| format!("failed to write GeoJSON to {}", path.display()))?;
    tracing::info!(path = %path.display(), features = collection.features.len(), "wrote GeoJSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use gasrec_core::{rank, Coordinates, PresentContext, ResultPresenter};

    use super::*;
    use crate::test_support::station;

    fn presented() -> ResultPresenter {
        let ranked = rank(
            vec![
                station("Shell", 37.78, -122.41, 30.0),
                station("Arco", 37.76, -122.43, 40.0),
            ],
            &["shell".to_string()],
        );
        let mut presenter = ResultPresenter::default();
        let ctx = PresentContext {
            fuel_grade: "87",
            fuel_needed: 10.0,
            user_label: None,
        };
        let _ = presenter.present(&ranked, Some(Coordinates::new(37.77, -122.42)), None, &ctx);
        presenter
    }

    #[test]
    fn one_point_feature_per_marker() {
        let collection = to_feature_collection(presented().map()).unwrap();
        assert_eq!(collection.features.len(), 3);

        let user = &collection.features[0];
        assert_eq!(user.property("kind").and_then(|v| v.as_str()), Some("user"));

        let first = &collection.features[1];
        assert_eq!(first.property("rank").and_then(serde_json::Value::as_u64), Some(1));
        assert_eq!(
            first
                .property("emphasized")
                .and_then(serde_json::Value::as_bool),
            Some(true)
        );
        let Some(geojson::Value::Point(coords)) = first.geometry.as_ref().map(|g| &g.value) else {
            panic!("expected point geometry");
        };
        assert_eq!(coords, &vec![-122.41, 37.78]);
    }

    #[test]
    fn writes_feature_collection_file() {
        let dir = std::env::temp_dir().join(format!("gasrec-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("markers.geojson");

        write_geojson(presented().map(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: geojson::GeoJson = text.parse().unwrap();
        let geojson::GeoJson::FeatureCollection(fc) = parsed else {
            panic!("expected a feature collection");
        };
        assert_eq!(fc.features.len(), 3);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
