//! Core built-ins registration.

use crate::runner::ds::error::JErrorType;
use crate::runner::plugin::registry::PrototypeRegistry;

use super::array;
use super::boolean;
use super::class;
use super::host_object;
use super::number;
use super::object;
use super::string;

/// Install the built-in members on the registry's well-known prototypes.
pub fn register_core_prototypes(registry: &mut PrototypeRegistry) -> Result<(), JErrorType> {
    object::register(registry)?;
    array::register(registry)?;
    string::register(registry)?;
    number::register(registry)?;
    boolean::register(registry)?;
    class::register(registry)?;
    host_object::register(registry)?;
    debug!("registered core prototype members");
    Ok(())
}
