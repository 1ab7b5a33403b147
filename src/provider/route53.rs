//! An [Amazon Route 53][route53] implementation of the [`RecordProvider`][super::RecordProvider]
//! trait.
//!
//! Every call goes straight to the Route 53 API. Nothing is cached between requests and no call
//! is retried; a failed call surfaces as [`Error::Provider`].
//!
//! [route53]: https://docs.aws.amazon.com/Route53/latest/APIReference/Welcome.html
use crate::error::Error;
use crate::provider::{normalize_name, require_hostname, Record, RecordProvider};
use aws_sdk_route53::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_route53::error::{BuildError, DisplayErrorContext};
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, ResourceRecord, ResourceRecordSet, RrType,
};
use aws_sdk_route53::Client;

const CHANGE_COMMENT: &str = "Updating DNS record via route53-dyndns";
const CREDENTIALS_SOURCE: &str = "route53-dyndns-config";

// Two items is enough to tell "exactly one weighted record" apart from "several".
const LOOKUP_MAX_ITEMS: i32 = 2;

/// A record provider backed by a single Route 53 hosted zone.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct Route53Provider {
    client: Client,
    hosted_zone_id: String,
}

impl Route53Provider {
    /// Create a provider for `hosted_zone_id` that signs requests with the given static IAM
    /// access key pair.
    pub fn new(
        access_key: &str,
        secret_access_key: &str,
        region: &str,
        hosted_zone_id: &str,
    ) -> Self {
        let credentials = Credentials::new(
            access_key,
            secret_access_key,
            None,
            None,
            CREDENTIALS_SOURCE,
        );
        let config = aws_sdk_route53::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials)
            .build();
        Self {
            client: Client::from_conf(config),
            hosted_zone_id: hosted_zone_id.to_string(),
        }
    }

    /// Pick the one `A` record set named `hostname` out of a `ListResourceRecordSets` page.
    ///
    /// The listing starts *at* the requested name, so sets for lexically later names can show up
    /// when the hostname itself has no record.
    ///
    /// A missing hostname therefore answers differently depending on where it sorts in the zone.
    /// With later names in the zone the page holds only those and the result is `Ok(None)`. If it
    /// sorts after every record the page is empty, which is reported as
    /// [`Error::RecordCount`] with a count of zero.
    fn select_record(
        hostname: &str,
        record_sets: &[ResourceRecordSet],
    ) -> Result<Option<Record>, Error> {
        if record_sets.is_empty() {
            return Err(Error::RecordCount {
                hostname: hostname.to_string(),
                count: 0,
            });
        }

        let wanted = normalize_name(hostname);
        let matching: Vec<&ResourceRecordSet> = record_sets
            .iter()
            .filter(|set| *set.r#type() == RrType::A && normalize_name(set.name()) == wanted)
            .collect();

        match matching.as_slice() {
            [] => Ok(None),
            [set] => Self::to_record(set).map(Some),
            sets => Err(Error::RecordCount {
                hostname: hostname.to_string(),
                count: sets.len(),
            }),
        }
    }

    fn to_record(set: &ResourceRecordSet) -> Result<Record, Error> {
        match set.resource_records() {
            [resource_record] => Ok(Record {
                name: set.name().to_string(),
                record_type: set.r#type().as_str().to_string(),
                set_identifier: set.set_identifier().map(str::to_string),
                ttl: set.ttl(),
                weight: set.weight(),
                value: resource_record.value().to_string(),
            }),
            values => Err(Error::MalformedRecord {
                name: set.name().to_string(),
                values: values.len(),
            }),
        }
    }

    fn upsert_batch(record: &Record, value: &str) -> Result<ChangeBatch, BuildError> {
        let resource_record = ResourceRecord::builder().value(value).build()?;
        let record_set = ResourceRecordSet::builder()
            .name(&record.name)
            .r#type(RrType::from(record.record_type.as_str()))
            .set_set_identifier(record.set_identifier.clone())
            .set_ttl(record.ttl)
            .set_weight(record.weight)
            .resource_records(resource_record)
            .build()?;
        let change = Change::builder()
            .action(ChangeAction::Upsert)
            .resource_record_set(record_set)
            .build()?;
        ChangeBatch::builder()
            .comment(CHANGE_COMMENT)
            .changes(change)
            .build()
    }
}

#[async_trait::async_trait]
impl RecordProvider for Route53Provider {
    async fn find_record(&self, hostname: &str) -> Result<Option<Record>, Error> {
        let hostname = require_hostname(hostname)?;
        let response = self
            .client
            .list_resource_record_sets()
            .hosted_zone_id(&self.hosted_zone_id)
            .start_record_name(hostname)
            .start_record_type(RrType::A)
            .max_items(LOOKUP_MAX_ITEMS)
            .send()
            .await
            .map_err(|err| Error::Provider(DisplayErrorContext(&err).to_string()))?;
        Self::select_record(hostname, response.resource_record_sets())
    }

    async fn update_record(&self, record: &Record, value: &str) -> Result<bool, Error> {
        if record.value == value {
            return Ok(true);
        }

        let change_batch =
            Self::upsert_batch(record, value).map_err(|err| Error::Provider(err.to_string()))?;
        let response = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(&self.hosted_zone_id)
            .change_batch(change_batch)
            .send()
            .await
            .map_err(|err| Error::Provider(DisplayErrorContext(&err).to_string()))?;
        tracing::debug!(
            "route 53 accepted change for \"{}\": {:?}",
            record.name,
            response.change_info()
        );
        Ok(true)
    }
}
