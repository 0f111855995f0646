//! Profile selection at session start

use super::choose::{choose, Choice};
use super::Event;
use crate::console::Console;
use crate::prompt::Listing;
use crate::store::Profile;

/// Ask the user which profile to use
pub async fn select_profile<C>(console: &mut C, profiles: &[Profile]) -> std::io::Result<Event>
where
    C: Console + ?Sized,
{
    let listing = Listing::from_labels(profiles.iter().map(Profile::display_label));
    let event = match choose(console, &listing, "Enter your option: ").await? {
        Choice::Row(index) => Event::ProfileChosen(index),
        Choice::Exit => Event::ExitChosen,
        Choice::Closed => Event::InputClosed,
    };
    Ok(event)
}
