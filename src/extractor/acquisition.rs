use super::helpers::parameter_value;
use super::MetadataExtractor;
use crate::metadata::{FieldValue, MetadataRecord};
use crate::nmrml::{paths, NmrMLDocument, NmrMLError};

/// Acquisition parameter sub-paths (relative to `acquisitionParameterSet`)
/// and the field each one fills, in insertion order.
pub const ACQUISITION_FIELDS: [(&str, &str); 12] = [
    ("sampleAcquisitionTemperature", "Temperature"),
    ("sampleContainer", "NMR tube type"),
    ("spinningRate", "Spinning Rate"),
    ("relaxationDelay", "Relaxation Delay"),
    ("pulseSequence/userParam", "Pulse sequence name"),
    ("DirectDimensionParameterSet/acquisitionNucleus", "Acquisition Nucleus"),
    ("DirectDimensionParameterSet/decouplingNucleus", "Decoupling Nucleus"),
    ("DirectDimensionParameterSet/effectiveExcitationField", "Effective Excitation Field"),
    ("DirectDimensionParameterSet/sweepWidth", "Sweep Width"),
    ("DirectDimensionParameterSet/pulseWidth", "Pulse Width"),
    ("DirectDimensionParameterSet/irradiationFrequency", "Irradiation Frequency"),
    ("DirectDimensionParameterSet/samplingStrategy", "Sampling Strategy"),
];

impl MetadataExtractor<'_> {
    /// Scan counters and the fixed acquisition parameter table
    pub(super) fn read_acquisition(
        &self,
        document: &NmrMLDocument,
        record: &mut MetadataRecord,
    ) -> Result<(), NmrMLError> {
        let parameters = match document.find(paths::ACQUISITION_1D) {
            Some(parameters) => parameters,
            None => document.require(paths::ACQUISITION_MULTI_D).map_err(|_| {
                NmrMLError::MissingElement {
                    document: document.name().to_string(),
                    path: paths::ACQUISITION_1D.to_string(),
                }
            })?,
        };

        let scans = document.require_int(parameters, "numberOfScans")?;
        let steady_state = document.require_int(parameters, "numberOfSteadyStateScans")?;
        record.insert("Number of scans", FieldValue::valued(scans));
        record.insert("Number of steady state scans", FieldValue::valued(steady_state));

        // Every field is created, even when its element is absent, so that
        // documents sharing an acquisition layout share a column layout.
        for (path, field) in ACQUISITION_FIELDS {
            let value = parameters
                .find(path)
                .map(parameter_value)
                .unwrap_or_default();
            record.insert(field, value);
        }

        Ok(())
    }
}
