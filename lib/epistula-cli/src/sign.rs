use crate::{args::SignArgs, util};
use epistula::{Configuration, Keypair, Signer};

pub async fn do_it(args: SignArgs, config: Configuration) -> miette::Result<()> {
    let keypair = Keypair::from_seed_hex(&args.seed, config.ss58_prefix)?;
    let body = util::read_body(args.body).await?;

    let headers = Signer::builder()
        .config(config)
        .build()
        .generate(&keypair, &args.receiver, &body)?;

    for (name, value) in headers.iter() {
        println!("{name}: {value}");
    }

    Ok(())
}
