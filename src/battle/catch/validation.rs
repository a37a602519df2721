use crate::errors::ActionRejection;
use crate::player::Roster;
use schema::Item;

/// Check if a catch attempt with `ball` can be made.
/// A rejected attempt consumes nothing.
pub fn can_attempt_catch(roster: &Roster, ball: &Item) -> Result<(), ActionRejection> {
    if roster.item_count(ball) == 0 {
        return Err(ActionRejection::OutOfItem(ball.clone()));
    }
    if !roster.can_catch() {
        return Err(ActionRejection::TeamFull);
    }
    Ok(())
}
