use crate::cli::ArnArgs;
use genu::kernel::arn::Arn;
use serde_json::json;

pub(super) fn arn(args: &ArnArgs) -> anyhow::Result<()> {
    let arn = Arn::parse(&args.arn)?;
    let runtime_id = arn.runtime_id();

    if args.json {
        let value = json!({
            "partition": arn.partition,
            "service": arn.service,
            "region": arn.region,
            "account": arn.account,
            "resource": arn.resource,
            "runtimeId": runtime_id,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("partition: {}", arn.partition);
    println!("service:   {}", arn.service);
    println!("region:    {}", arn.region);
    println!("account:   {}", arn.account);
    println!("resource:  {}", arn.resource);
    if let Some(id) = runtime_id {
        println!("runtime:   {id}");
    }
    Ok(())
}
