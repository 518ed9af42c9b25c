// ABOUTME: Resource handles grouping the operations on each API resource.
// ABOUTME: Each handle borrows a client; async and blocking impls share request building.

use super::{BlockingOpenAq, OpenAq};
use crate::endpoints::{
    by_id, nested, CountriesQuery, LocationsQuery, MeasurementsQuery, PageQuery, ParametersQuery,
    ProvidersQuery,
};
use crate::error::OpenAqError;
use crate::models::{
    CountriesResponse, InstrumentsResponse, LatestResponse, LicensesResponse, LocationsResponse,
    ManufacturersResponse, MeasurementsResponse, OwnersResponse, ParametersResponse,
    ProvidersResponse, SensorsResponse,
};

macro_rules! resource {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name<'a, C> {
            client: &'a C,
        }

        impl<'a, C> $name<'a, C> {
            pub(crate) fn new(client: &'a C) -> Self {
                Self { client }
            }
        }
    };
}

resource!(
    /// Monitoring locations: `/locations`.
    Locations
);
resource!(
    /// Individual sensors: `/sensors/{id}`.
    Sensors
);
resource!(
    /// Sensor measurements, raw or aggregated.
    Measurements
);
resource!(
    /// Data providers: `/providers`.
    Providers
);
resource!(
    /// Measured parameters: `/parameters`.
    Parameters
);
resource!(
    /// Countries: `/countries`.
    Countries
);
resource!(
    /// Instruments: `/instruments`.
    Instruments
);
resource!(
    /// Instrument manufacturers: `/manufacturers`.
    Manufacturers
);
resource!(
    /// Location owners: `/owners`.
    Owners
);
resource!(
    /// Data licenses: `/licenses`.
    Licenses
);

// ============================================================================
// Async
// ============================================================================

impl Locations<'_, OpenAq> {
    pub async fn get(&self, locations_id: u32) -> Result<LocationsResponse, OpenAqError> {
        self.client.get(by_id("locations", locations_id)?).await
    }

    pub async fn list(&self, query: &LocationsQuery) -> Result<LocationsResponse, OpenAqError> {
        self.client.get(query.to_request()?).await
    }

    /// Latest value of every sensor at a location.
    pub async fn latest(&self, locations_id: u32) -> Result<LatestResponse, OpenAqError> {
        self.client.get(nested("locations", locations_id, "latest")?).await
    }

    pub async fn sensors(&self, locations_id: u32) -> Result<SensorsResponse, OpenAqError> {
        self.client.get(nested("locations", locations_id, "sensors")?).await
    }
}

impl Sensors<'_, OpenAq> {
    pub async fn get(&self, sensors_id: u32) -> Result<SensorsResponse, OpenAqError> {
        self.client.get(by_id("sensors", sensors_id)?).await
    }
}

impl Measurements<'_, OpenAq> {
    pub async fn list(&self, query: &MeasurementsQuery) -> Result<MeasurementsResponse, OpenAqError> {
        self.client.get(query.to_request()?).await
    }
}

impl Providers<'_, OpenAq> {
    pub async fn get(&self, providers_id: u32) -> Result<ProvidersResponse, OpenAqError> {
        self.client.get(by_id("providers", providers_id)?).await
    }

    pub async fn list(&self, query: &ProvidersQuery) -> Result<ProvidersResponse, OpenAqError> {
        self.client.get(query.to_request()?).await
    }
}

impl Parameters<'_, OpenAq> {
    pub async fn get(&self, parameters_id: u32) -> Result<ParametersResponse, OpenAqError> {
        self.client.get(by_id("parameters", parameters_id)?).await
    }

    pub async fn list(&self, query: &ParametersQuery) -> Result<ParametersResponse, OpenAqError> {
        self.client.get(query.to_request()?).await
    }

    /// Latest values for a parameter across all locations.
    pub async fn latest(&self, parameters_id: u32) -> Result<LatestResponse, OpenAqError> {
        self.client.get(nested("parameters", parameters_id, "latest")?).await
    }
}

impl Countries<'_, OpenAq> {
    pub async fn get(&self, countries_id: u32) -> Result<CountriesResponse, OpenAqError> {
        self.client.get(by_id("countries", countries_id)?).await
    }

    pub async fn list(&self, query: &CountriesQuery) -> Result<CountriesResponse, OpenAqError> {
        self.client.get(query.to_request()?).await
    }
}

impl Instruments<'_, OpenAq> {
    pub async fn get(&self, instruments_id: u32) -> Result<InstrumentsResponse, OpenAqError> {
        self.client.get(by_id("instruments", instruments_id)?).await
    }

    pub async fn list(&self, query: &PageQuery) -> Result<InstrumentsResponse, OpenAqError> {
        self.client.get(query.to_request("/instruments")?).await
    }
}

impl Manufacturers<'_, OpenAq> {
    pub async fn get(&self, manufacturers_id: u32) -> Result<ManufacturersResponse, OpenAqError> {
        self.client.get(by_id("manufacturers", manufacturers_id)?).await
    }

    pub async fn list(&self, query: &PageQuery) -> Result<ManufacturersResponse, OpenAqError> {
        self.client.get(query.to_request("/manufacturers")?).await
    }

    /// Instruments made by a manufacturer.
    pub async fn instruments(&self, manufacturers_id: u32) -> Result<InstrumentsResponse, OpenAqError> {
        self.client
            .get(nested("manufacturers", manufacturers_id, "instruments")?)
            .await
    }
}

impl Owners<'_, OpenAq> {
    pub async fn get(&self, owners_id: u32) -> Result<OwnersResponse, OpenAqError> {
        self.client.get(by_id("owners", owners_id)?).await
    }

    pub async fn list(&self, query: &PageQuery) -> Result<OwnersResponse, OpenAqError> {
        self.client.get(query.to_request("/owners")?).await
    }
}

impl Licenses<'_, OpenAq> {
    pub async fn get(&self, licenses_id: u32) -> Result<LicensesResponse, OpenAqError> {
        self.client.get(by_id("licenses", licenses_id)?).await
    }

    pub async fn list(&self, query: &PageQuery) -> Result<LicensesResponse, OpenAqError> {
        self.client.get(query.to_request("/licenses")?).await
    }
}

// ============================================================================
// Blocking
// ============================================================================

impl Locations<'_, BlockingOpenAq> {
    pub fn get(&self, locations_id: u32) -> Result<LocationsResponse, OpenAqError> {
        self.client.get(by_id("locations", locations_id)?)
    }

    pub fn list(&self, query: &LocationsQuery) -> Result<LocationsResponse, OpenAqError> {
        self.client.get(query.to_request()?)
    }

    pub fn latest(&self, locations_id: u32) -> Result<LatestResponse, OpenAqError> {
        self.client.get(nested("locations", locations_id, "latest")?)
    }

    pub fn sensors(&self, locations_id: u32) -> Result<SensorsResponse, OpenAqError> {
        self.client.get(nested("locations", locations_id, "sensors")?)
    }
}

impl Sensors<'_, BlockingOpenAq> {
    pub fn get(&self, sensors_id: u32) -> Result<SensorsResponse, OpenAqError> {
        self.client.get(by_id("sensors", sensors_id)?)
    }
}

impl Measurements<'_, BlockingOpenAq> {
    pub fn list(&self, query: &MeasurementsQuery) -> Result<MeasurementsResponse, OpenAqError> {
        self.client.get(query.to_request()?)
    }
}

impl Providers<'_, BlockingOpenAq> {
    pub fn get(&self, providers_id: u32) -> Result<ProvidersResponse, OpenAqError> {
        self.client.get(by_id("providers", providers_id)?)
    }

    pub fn list(&self, query: &ProvidersQuery) -> Result<ProvidersResponse, OpenAqError> {
        self.client.get(query.to_request()?)
    }
}

impl Parameters<'_, BlockingOpenAq> {
    pub fn get(&self, parameters_id: u32) -> Result<ParametersResponse, OpenAqError> {
        self.client.get(by_id("parameters", parameters_id)?)
    }

    pub fn list(&self, query: &ParametersQuery) -> Result<ParametersResponse, OpenAqError> {
        self.client.get(query.to_request()?)
    }

    pub fn latest(&self, parameters_id: u32) -> Result<LatestResponse, OpenAqError> {
        self.client.get(nested("parameters", parameters_id, "latest")?)
    }
}

impl Countries<'_, BlockingOpenAq> {
    pub fn get(&self, countries_id: u32) -> Result<CountriesResponse, OpenAqError> {
        self.client.get(by_id("countries", countries_id)?)
    }

    pub fn list(&self, query: &CountriesQuery) -> Result<CountriesResponse, OpenAqError> {
        self.client.get(query.to_request()?)
    }
}

impl Instruments<'_, BlockingOpenAq> {
    pub fn get(&self, instruments_id: u32) -> Result<InstrumentsResponse, OpenAqError> {
        self.client.get(by_id("instruments", instruments_id)?)
    }

    pub fn list(&self, query: &PageQuery) -> Result<InstrumentsResponse, OpenAqError> {
        self.client.get(query.to_request("/instruments")?)
    }
}

impl Manufacturers<'_, BlockingOpenAq> {
    pub fn get(&self, manufacturers_id: u32) -> Result<ManufacturersResponse, OpenAqError> {
        self.client.get(by_id("manufacturers", manufacturers_id)?)
    }

    pub fn list(&self, query: &PageQuery) -> Result<ManufacturersResponse, OpenAqError> {
        self.client.get(query.to_request("/manufacturers")?)
    }

    pub fn instruments(&self, manufacturers_id: u32) -> Result<InstrumentsResponse, OpenAqError> {
        self.client
            .get(nested("manufacturers", manufacturers_id, "instruments")?)
    }
}

impl Owners<'_, BlockingOpenAq> {
    pub fn get(&self, owners_id: u32) -> Result<OwnersResponse, OpenAqError> {
        self.client.get(by_id("owners", owners_id)?)
    }

    pub fn list(&self, query: &PageQuery) -> Result<OwnersResponse, OpenAqError> {
        self.client.get(query.to_request("/owners")?)
    }
}

impl Licenses<'_, BlockingOpenAq> {
    pub fn get(&self, licenses_id: u32) -> Result<LicensesResponse, OpenAqError> {
        self.client.get(by_id("licenses", licenses_id)?)
    }

    pub fn list(&self, query: &PageQuery) -> Result<LicensesResponse, OpenAqError> {
        self.client.get(query.to_request("/licenses")?)
    }
}
