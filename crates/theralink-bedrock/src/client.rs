/// Load the AWS SDK config for a region from the default credential chain.
///
/// Credentials are never read by TheraLink itself; whatever the chain
/// resolves (environment, profile, instance role) is used as-is.
pub async fn load_sdk_config(region: &str) -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await
}
