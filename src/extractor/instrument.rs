use super::helpers::software_fields;
use super::MetadataExtractor;
use crate::controlled_vocabulary::NMR_CV_REF;
use crate::metadata::{FieldValue, MetadataRecord};
use crate::nmrml::{paths, NmrMLDocument, NmrMLError};
use crate::ontology::{clean_vendor_label, TermCategory, TermId};

/// Where an instrument annotation matched in the ontology
#[derive(Debug, Clone, Copy)]
enum InstrumentMatch {
    /// A full instrument model: the vendor grouping is two levels up
    Model(TermId),
    /// An instrument family: the vendor grouping is one level up
    Generic(TermId),
}

impl InstrumentMatch {
    fn term(self) -> TermId {
        match self {
            InstrumentMatch::Model(id) | InstrumentMatch::Generic(id) => id,
        }
    }

    fn vendor_levels(self) -> usize {
        match self {
            InstrumentMatch::Model(_) => 2,
            InstrumentMatch::Generic(_) => 1,
        }
    }
}

impl MetadataExtractor<'_> {
    /// Instrument, manufacturer and instrument software
    pub(super) fn read_instrument(
        &self,
        document: &NmrMLDocument,
        record: &mut MetadataRecord,
    ) -> Result<(), NmrMLError> {
        let configuration = document.require(paths::INSTRUMENT_CONFIGURATION)?;

        let matched = configuration.children_named("cvParam").find_map(|cv| {
            let accession = cv.attr("accession")?;
            let found = self.match_instrument(accession)?;
            Some((cv, found))
        });

        match matched {
            Some((cv, found)) => {
                let node = self.index.node(found.term());
                let name = cv
                    .attr("name")
                    .or_else(|| node.label())
                    .unwrap_or_default();
                record.insert(
                    "Instrument",
                    FieldValue::term(name, NMR_CV_REF, node.accession.as_str()),
                );
                if let Some(manufacturer) = self.manufacturer(found) {
                    record.insert("Instrument Manufacturer", manufacturer);
                }
            }
            None => log::warn!(
                "{}: no instrument annotation matches a known nmrCV instrument",
                document.name()
            ),
        }

        let software_ref = configuration
            .child("softwareRef")
            .and_then(|e| e.attr("ref"));
        if let Some(software_ref) = software_ref {
            if let Some((software, version)) = software_fields(document, software_ref) {
                record.insert("Instrument software", software);
                if let Some(version) = version {
                    record.insert("Instrument software version", version);
                }
            }
        }

        Ok(())
    }

    fn match_instrument(&self, accession: &str) -> Option<InstrumentMatch> {
        if let Some(id) = self.index.lookup(TermCategory::InstrumentModel, accession) {
            return Some(InstrumentMatch::Model(id));
        }
        self.index
            .lookup(TermCategory::InstrumentGeneric, accession)
            .map(InstrumentMatch::Generic)
    }

    /// Vendor of a matched instrument: the vendor grouping label with its
    /// suffix stripped, with an accession when the vendor is a known term.
    fn manufacturer(&self, found: InstrumentMatch) -> Option<FieldValue> {
        let group = self.index.ancestor(found.term(), found.vendor_levels())?;
        let label = clean_vendor_label(self.index.node(group).label()?);

        match self.index.lookup(TermCategory::Vendor, label) {
            Some(vendor) => Some(FieldValue::term(
                label,
                NMR_CV_REF,
                self.index.node(vendor).accession.as_str(),
            )),
            None => {
                log::debug!("Vendor {:?} is not an nmrCV vendor term", label);
                Some(FieldValue::named(label))
            }
        }
    }
}
