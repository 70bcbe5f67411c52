use crate::cli::IndexArgs;
use crate::error::{CliError, Result};
use deepbias::core::index::IndexConverter;

pub fn run(args: IndexArgs) -> Result<()> {
    let ic = IndexConverter::new(args.nout, args.natom, args.ndim)?;
    println!("{}", describe(&ic, args.flat, args.at.as_deref())?);
    Ok(())
}

fn describe(ic: &IndexConverter, flat: Option<usize>, at: Option<&str>) -> Result<String> {
    match (flat, at) {
        (Some(flat), _) => {
            let (iout, iatom, idim) = ic.unflatten_with_channel(flat)?;
            Ok(format!(
                "flat {} -> channel {}, atom {}, dim {}",
                flat, iout, iatom, idim
            ))
        }
        (None, Some(at)) => {
            let parts = parse_triple(at)?;
            let flat = match parts.as_slice() {
                [iatom, idim] => ic.flatten(*iatom, *idim)?,
                [iout, iatom, idim] => ic.flatten_with_channel(*iout, *iatom, *idim)?,
                _ => {
                    return Err(CliError::Argument(format!(
                        "Expected 'ATOM,DIM' or 'CHANNEL,ATOM,DIM', got '{}'",
                        at
                    )));
                }
            };
            Ok(format!("{} -> flat {}", at, flat))
        }
        (None, None) => Err(CliError::Argument(
            "Either --flat or --at must be given.".to_string(),
        )),
    }
}

fn parse_triple(value: &str) -> Result<Vec<isize>> {
    value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<isize>()
                .map_err(|_| CliError::Argument(format!("Invalid index '{}' in '{}'", part, value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepbias::core::index::IndexError;

    #[test]
    fn flat_address_is_decomposed() {
        let ic = IndexConverter::new(3, 4, 3).unwrap();
        assert_eq!(
            describe(&ic, Some(17), None).unwrap(),
            "flat 17 -> channel 1, atom 1, dim 2"
        );
    }

    #[test]
    fn triple_and_pair_are_flattened() {
        let ic = IndexConverter::new(3, 4, 3).unwrap();
        assert_eq!(
            describe(&ic, None, Some("1,1,2")).unwrap(),
            "1,1,2 -> flat 17"
        );
        assert_eq!(
            describe(&ic, None, Some("-1,-1,-1")).unwrap(),
            "-1,-1,-1 -> flat 35"
        );
        assert!(matches!(
            describe(&ic, None, Some("2,0")),
            Err(CliError::Index(IndexError::MultipleChannels { nout: 3 }))
        ));

        let single = IndexConverter::for_atoms(4, 3).unwrap();
        assert_eq!(describe(&single, None, Some("2,0")).unwrap(), "2,0 -> flat 6");
    }

    #[test]
    fn out_of_range_and_malformed_input_fail() {
        let ic = IndexConverter::new(1, 2, 3).unwrap();
        assert!(matches!(describe(&ic, Some(6), None), Err(CliError::Index(_))));
        assert!(matches!(
            describe(&ic, None, Some("0,x")),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(
            describe(&ic, None, Some("1")),
            Err(CliError::Argument(_))
        ));
    }
}
