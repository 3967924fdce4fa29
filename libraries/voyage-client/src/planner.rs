//! Itineraries page state: the list, the create/edit form, and the
//! destinations handed to the map.
//!
//! The page talks to the API through [`ItineraryApi`] and issues one call
//! at a time; every successful mutation is followed by a reload of the list.

use crate::error::Result;
use async_trait::async_trait;
use voyage_core::{
    Destination, DestinationInput, Itinerary, ItineraryId, ItineraryInput,
};

pub const FETCH_FAILED: &str = "Failed to fetch itineraries";
pub const CREATE_FAILED: &str = "Failed to create itinerary";
pub const UPDATE_FAILED: &str = "Failed to update itinerary";
pub const DELETE_FAILED: &str = "Failed to delete itinerary";

/// The itinerary operations the page needs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItineraryApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Itinerary>>;
    async fn create(&self, input: &ItineraryInput) -> Result<Itinerary>;
    async fn update(&self, id: &ItineraryId, input: &ItineraryInput) -> Result<Itinerary>;
    async fn delete(&self, id: &ItineraryId) -> Result<()>;
}

/// One destination row of the form, holding raw input values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationDraft {
    pub location: String,
    /// `YYYY-MM-DD`, as a date input expects
    pub start_date: String,
    /// `YYYY-MM-DD`, as a date input expects
    pub end_date: String,
    pub notes: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A change to a single field of a destination row
#[derive(Debug, Clone, PartialEq)]
pub enum DestinationEdit {
    Location(String),
    StartDate(String),
    EndDate(String),
    Notes(String),
    Latitude(Option<f64>),
    Longitude(Option<f64>),
}

impl DestinationDraft {
    fn from_destination(destination: &Destination) -> Self {
        Self {
            location: destination.location.clone(),
            start_date: destination.start_date.format("%Y-%m-%d").to_string(),
            end_date: destination.end_date.format("%Y-%m-%d").to_string(),
            notes: destination.notes.clone().unwrap_or_default(),
            latitude: destination.latitude,
            longitude: destination.longitude,
        }
    }

    fn apply(&mut self, edit: DestinationEdit) {
        match edit {
            DestinationEdit::Location(v) => self.location = v,
            DestinationEdit::StartDate(v) => self.start_date = v,
            DestinationEdit::EndDate(v) => self.end_date = v,
            DestinationEdit::Notes(v) => self.notes = v,
            DestinationEdit::Latitude(v) => self.latitude = v,
            DestinationEdit::Longitude(v) => self.longitude = v,
        }
    }

    fn to_input(&self) -> DestinationInput {
        DestinationInput {
            location: Some(self.location.clone()),
            start_date: Some(self.start_date.clone()),
            end_date: Some(self.end_date.clone()),
            notes: Some(self.notes.clone()).filter(|n| !n.trim().is_empty()),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// The form's itinerary draft. A fresh draft has one blank row.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryDraft {
    pub title: String,
    pub destinations: Vec<DestinationDraft>,
}

impl Default for ItineraryDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            destinations: vec![DestinationDraft::default()],
        }
    }
}

impl ItineraryDraft {
    /// Pre-fill from a stored itinerary
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let destinations: Vec<_> = itinerary
            .destinations
            .iter()
            .map(DestinationDraft::from_destination)
            .collect();

        Self {
            title: itinerary.title.clone(),
            destinations: if destinations.is_empty() {
                vec![DestinationDraft::default()]
            } else {
                destinations
            },
        }
    }

    /// Request body for create/update
    pub fn to_input(&self) -> ItineraryInput {
        ItineraryInput {
            title: Some(self.title.clone()),
            destinations: Some(self.destinations.iter().map(DestinationDraft::to_input).collect()),
        }
    }
}

/// State of the itineraries page
pub struct ItinerariesPage<A> {
    api: A,
    itineraries: Vec<Itinerary>,
    loading: bool,
    error: Option<String>,
    form_open: bool,
    editing: Option<ItineraryId>,
    draft: ItineraryDraft,
}

impl<A: ItineraryApi> ItinerariesPage<A> {
    /// A page that has not loaded yet; call [`Self::refresh`] to load
    pub fn new(api: A) -> Self {
        Self {
            api,
            itineraries: Vec::new(),
            loading: true,
            error: None,
            form_open: false,
            editing: None,
            draft: ItineraryDraft::default(),
        }
    }

    pub fn itineraries(&self) -> &[Itinerary] {
        &self.itineraries
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// Id of the itinerary being edited, if the form is in edit mode
    pub fn editing(&self) -> Option<&ItineraryId> {
        self.editing.as_ref()
    }

    pub fn draft(&self) -> &ItineraryDraft {
        &self.draft
    }

    /// Reload the list from the server
    pub async fn refresh(&mut self) {
        match self.api.list().await {
            Ok(itineraries) => {
                self.itineraries = itineraries;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch itineraries");
                self.error = Some(FETCH_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    /// Close the form and discard the draft and edit mode
    pub fn cancel(&mut self) {
        self.draft = ItineraryDraft::default();
        self.form_open = false;
        self.editing = None;
    }

    /// The header button: opens the form, or cancels it when open
    pub fn toggle_form(&mut self) {
        if self.form_open {
            self.cancel();
        } else {
            self.open_form();
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn add_destination(&mut self) {
        self.draft.destinations.push(DestinationDraft::default());
    }

    /// Remove a row; the last remaining row is never removed
    pub fn remove_destination(&mut self, index: usize) -> bool {
        if self.draft.destinations.len() > 1 && index < self.draft.destinations.len() {
            self.draft.destinations.remove(index);
            true
        } else {
            false
        }
    }

    /// Edit one field of one row; out-of-range rows are ignored
    pub fn edit_destination(&mut self, index: usize, edit: DestinationEdit) {
        if let Some(row) = self.draft.destinations.get_mut(index) {
            row.apply(edit);
        }
    }

    /// Switch the form to edit mode for an existing itinerary
    pub fn begin_edit(&mut self, itinerary: &Itinerary) {
        self.draft = ItineraryDraft::from_itinerary(itinerary);
        self.editing = Some(itinerary.id.clone());
        self.form_open = true;
    }

    /// Create or update depending on edit mode, then reset and reload.
    ///
    /// The draft is checked locally first so an incomplete form never
    /// reaches the server. On failure the draft is kept and `error` set.
    pub async fn submit(&mut self) -> bool {
        let fallback = if self.editing.is_some() {
            UPDATE_FAILED
        } else {
            CREATE_FAILED
        };

        let input = self.draft.to_input();
        if let Err(e) = input.validate() {
            self.error = Some(e.message().to_string());
            return false;
        }

        let result = match &self.editing {
            Some(id) => self.api.update(id, &input).await,
            None => self.api.create(&input).await,
        };

        match result {
            Ok(_) => {
                self.error = None;
                self.cancel();
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save itinerary");
                self.error = Some(e.user_message(fallback));
                false
            }
        }
    }

    /// Delete an itinerary and reload.
    ///
    /// Asking the user for confirmation is the caller's job.
    pub async fn delete(&mut self, id: &ItineraryId) -> bool {
        match self.api.delete(id).await {
            Ok(()) => {
                self.error = None;
                if self.editing.as_ref() == Some(id) {
                    self.cancel();
                }
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to delete itinerary");
                self.error = Some(e.user_message(DELETE_FAILED));
                false
            }
        }
    }

    /// Every destination across all itineraries that can be plotted
    pub fn map_destinations(&self) -> Vec<&Destination> {
        self.itineraries
            .iter()
            .flat_map(|itinerary| itinerary.plottable_destinations())
            .collect()
    }
}
