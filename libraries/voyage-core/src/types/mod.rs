mod ids;
mod itinerary;
mod user;

pub use ids::{ItineraryId, UserId};
pub use itinerary::{Destination, Itinerary, NewItinerary};
pub use user::{NewUser, User, UserCredentials};
