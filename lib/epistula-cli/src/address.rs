use crate::args::AddressArgs;
use epistula::{Configuration, Keypair, SigningKey};

pub fn do_it(args: AddressArgs, config: &Configuration) -> miette::Result<()> {
    let keypair = Keypair::from_seed_hex(&args.seed, config.ss58_prefix)?;
    println!("{}", keypair.address());

    Ok(())
}
