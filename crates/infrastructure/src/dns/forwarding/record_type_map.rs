use coredns_probe_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

/// Mapping from the probe's question type to hickory's.
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
        }
    }
}
