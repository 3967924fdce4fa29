//! Map view model: which markers to draw and what to show while the map
//! provider's script loads.
//!
//! Rendering itself belongs to whatever front end embeds the provider's
//! widget; this module decides the scene.

use voyage_core::Destination;

/// Provider key shipped in sample env files; treated as unset.
pub const PLACEHOLDER_API_KEY: &str = "your_google_maps_api_key_here";

pub const NOT_CONFIGURED_MESSAGE: &str = "Google Maps API key not configured";
pub const LOADING_MESSAGE: &str = "Loading...";
pub const LOAD_FAILED_MESSAGE: &str = "Error loading map";

/// Initial map center (New York City)
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 40.7128,
    lng: -74.0060,
};

pub const DEFAULT_ZOOM: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Load state of the provider script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    /// No usable API key; the script is never requested
    NotConfigured,
    Loading,
    Failed,
    Ready,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub title: String,
}

impl Marker {
    fn for_destination(destination: &Destination) -> Option<Self> {
        let (lat, lng) = destination.coordinates()?;
        Some(Self {
            position: LatLng { lat, lng },
            title: destination.location.clone(),
        })
    }
}

/// A ready map
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene<'a> {
    pub center: LatLng,
    pub zoom: u8,
    pub markers: &'a [Marker],
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapRender<'a> {
    /// Text shown in place of the map
    Message(&'static str),
    Map(MapScene<'a>),
}

#[derive(Debug, Clone)]
pub struct MapView {
    status: ScriptStatus,
    markers: Vec<Marker>,
}

impl MapView {
    pub fn new<'d>(
        api_key: Option<&str>,
        destinations: impl IntoIterator<Item = &'d Destination>,
    ) -> Self {
        let status = match api_key.map(str::trim) {
            Some(key) if !key.is_empty() && key != PLACEHOLDER_API_KEY => ScriptStatus::Loading,
            _ => ScriptStatus::NotConfigured,
        };

        let mut view = Self {
            status,
            markers: Vec::new(),
        };
        view.set_destinations(destinations);
        view
    }

    pub fn status(&self) -> ScriptStatus {
        self.status
    }

    /// The provider script finished loading.
    pub fn script_loaded(&mut self) {
        if self.status != ScriptStatus::NotConfigured {
            self.status = ScriptStatus::Ready;
        }
    }

    /// The provider script could not be loaded.
    pub fn script_failed(&mut self) {
        if self.status != ScriptStatus::NotConfigured {
            tracing::warn!("Map script failed to load");
            self.status = ScriptStatus::Failed;
        }
    }

    /// Replace all markers; one per destination with both coordinates.
    pub fn set_destinations<'d>(
        &mut self,
        destinations: impl IntoIterator<Item = &'d Destination>,
    ) {
        self.markers = destinations
            .into_iter()
            .filter_map(Marker::for_destination)
            .collect();
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn render(&self) -> MapRender<'_> {
        match self.status {
            ScriptStatus::NotConfigured => MapRender::Message(NOT_CONFIGURED_MESSAGE),
            ScriptStatus::Loading => MapRender::Message(LOADING_MESSAGE),
            ScriptStatus::Failed => MapRender::Message(LOAD_FAILED_MESSAGE),
            ScriptStatus::Ready => MapRender::Map(MapScene {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
                markers: &self.markers,
            }),
        }
    }
}
