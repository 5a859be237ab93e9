/// Uninhabited success type for the firmware's `inner_main`, which only returns on error.
///
/// Stands in for `!`, which is not yet stable as a type.
#[derive(Debug)]
pub enum Never {}
