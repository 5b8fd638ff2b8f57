use tracing::{debug, error, warn};

use crate::address::Address;
use crate::command::{
    AdvertisingPacketContentFilterCommand, ApcfApplicationAddressType, ApcfCommand,
    ApcfFilterType,
};
use crate::error::{FilterError, Result};
use crate::uuids::{BtUuid, SizedUuid, UuidWidth};

/// Chooses the encoded byte width of a UUID.
///
/// Implementations may return any byte count; only 2, 4, and 16 are accepted
/// by the [`Translator`].
pub trait WidthResolver {
    fn resolve(&self, uuid: &BtUuid) -> u8;
}

/// The canonical resolver: shortest width that round-trips through the Base UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestWidth;

impl WidthResolver for ShortestWidth {
    fn resolve(&self, uuid: &BtUuid) -> u8 {
        uuid.shortest_representation_size()
    }
}

impl<R: WidthResolver + ?Sized> WidthResolver for &R {
    fn resolve(&self, uuid: &BtUuid) -> u8 {
        (**self).resolve(uuid)
    }
}

/// Converts [`ApcfCommand`] specs into validated filter commands.
#[derive(Debug, Clone, Default)]
pub struct Translator<R = ShortestWidth> {
    resolver: R,
}

impl Translator<ShortestWidth> {
    pub fn new() -> Self {
        Self::with_resolver(ShortestWidth)
    }
}

impl<R: WidthResolver> Translator<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    /// Translate a single filter spec.
    ///
    /// The UUID mask is narrowed to the width resolved from `spec.uuid`, not
    /// from the mask itself. Callers must size the mask consistently with the
    /// UUID. A mask supplied without a UUID is resolved against the empty
    /// UUID and so is always carried at full 128-bit width.
    ///
    /// Service and solicitation UUID filters must carry a UUID. A missing
    /// company mask becomes `0xFFFF`.
    pub fn translate(&self, spec: &ApcfCommand) -> Result<AdvertisingPacketContentFilterCommand> {
        let filter_type = ApcfFilterType::try_from(spec.filter_type)?;
        let address: Address = spec.address.parse()?;
        let application_address_type = ApcfApplicationAddressType::try_from(spec.addr_type)?;

        let uuid = if spec.uuid.is_empty() {
            if filter_type.is_uuid_filter() {
                return Err(FilterError::MissingUuid(filter_type));
            }
            None
        } else {
            let width = self.width_of(&spec.uuid)?;
            Some(SizedUuid::narrow(&spec.uuid, width))
        };

        let uuid_mask = if spec.uuid_mask.is_empty() {
            None
        } else {
            let width = self.width_of(&spec.uuid)?;
            Some(SizedUuid::narrow(&spec.uuid_mask, width))
        };

        let command = AdvertisingPacketContentFilterCommand {
            filter_type,
            address,
            application_address_type,
            uuid,
            uuid_mask,
            name: spec.name.clone(),
            company: spec.company,
            company_mask: spec.company_mask.unwrap_or(u16::MAX),
            data: spec.data.clone(),
            data_mask: spec.data_mask.clone(),
        };
        debug!(
            filter_type = ?command.filter_type,
            uuid_width = command.uuid.map(|u| u.width.num_bytes()),
            "filter translated"
        );
        Ok(command)
    }

    /// Translate every spec, or none.
    ///
    /// Stops at the first failing entry; later entries are not looked at.
    pub fn translate_batch(
        &self,
        specs: &[ApcfCommand],
    ) -> Result<Vec<AdvertisingPacketContentFilterCommand>> {
        let mut commands = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            match self.translate(spec) {
                Ok(command) => commands.push(command),
                Err(err) => {
                    error!(index, error = %err, "invalid apcf command");
                    return Err(err);
                }
            }
        }
        Ok(commands)
    }

    fn width_of(&self, uuid: &BtUuid) -> Result<UuidWidth> {
        let n = self.resolver.resolve(uuid);
        UuidWidth::from_num_bytes(n).ok_or_else(|| {
            warn!(width = n, "illegal UUID length");
            FilterError::InvalidUuidWidth(n)
        })
    }
}

/// Translate one spec with the shortest-width resolver.
pub fn translate(spec: &ApcfCommand) -> Result<AdvertisingPacketContentFilterCommand> {
    Translator::new().translate(spec)
}

/// Translate a batch with the shortest-width resolver; all-or-nothing.
pub fn translate_batch(
    specs: &[ApcfCommand],
) -> Result<Vec<AdvertisingPacketContentFilterCommand>> {
    Translator::new().translate_batch(specs)
}
