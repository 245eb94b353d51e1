use aws_sdk_s3::primitives::DateTime as SdkDateTime;
use chrono::{DateTime, Utc};

use crate::adapters::notifier::AlertPublisher;
use crate::adapters::object_listing::ObjectLister;
use crate::runtime::alert::AlertMessage;
use crate::runtime::discovery::ListedObject;

/// Lists a bucket through `ListObjectsV2`, draining every page.
pub struct S3ObjectLister {
    s3_client: aws_sdk_s3::Client,
}

impl S3ObjectLister {
    pub fn new(s3_client: aws_sdk_s3::Client) -> Self {
        Self { s3_client }
    }
}

impl ObjectLister for S3ObjectLister {
    fn list_objects(&self, bucket: &str) -> Result<Vec<ListedObject>, String> {
        let bucket = bucket.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let mut pages = client
                    .list_objects_v2()
                    .bucket(&bucket)
                    .into_paginator()
                    .send();

                let mut objects = Vec::new();
                let mut page_count = 0usize;
                while let Some(page) = pages.next().await {
                    let page = page.map_err(|error| {
                        format!(
                            "failed to list objects from s3: {}",
                            aws_sdk_s3::error::DisplayErrorContext(&error)
                        )
                    })?;
                    page_count += 1;

                    for object in page.contents() {
                        let (Some(key), Some(last_modified)) =
                            (object.key(), object.last_modified())
                        else {
                            tracing::warn!(
                                component = "s3_lister",
                                key = object.key().unwrap_or_default(),
                                "skipping object without key or last-modified time"
                            );
                            continue;
                        };

                        let last_modified = to_utc(last_modified).ok_or_else(|| {
                            format!("object '{key}' has an out-of-range last-modified time")
                        })?;
                        objects.push(ListedObject::new(key, last_modified));
                    }
                }

                tracing::debug!(
                    component = "s3_lister",
                    bucket = %bucket,
                    pages = page_count,
                    objects = objects.len(),
                    "listing exhausted"
                );
                Ok::<_, String>(objects)
            })
        })
    }
}

/// SDK timestamps are seconds since the UNIX epoch, so they are UTC by construction.
pub fn to_utc(timestamp: &SdkDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}

/// Publishes alerts to an SNS topic.
pub struct SnsAlertPublisher {
    sns_client: aws_sdk_sns::Client,
}

impl SnsAlertPublisher {
    pub fn new(sns_client: aws_sdk_sns::Client) -> Self {
        Self { sns_client }
    }
}

impl AlertPublisher for SnsAlertPublisher {
    fn publish(&self, destination: &str, message: &AlertMessage) -> Result<String, String> {
        let topic_arn = destination.to_string();
        let subject = message.subject.clone();
        let body = message.body.clone();
        let client = self.sns_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .publish()
                    .topic_arn(topic_arn)
                    .subject(subject)
                    .message(body)
                    .send()
                    .await
                    .map(|output| output.message_id().unwrap_or_default().to_string())
                    .map_err(|error| {
                        format!(
                            "failed to publish to sns: {}",
                            aws_sdk_sns::error::DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}
