use anyhow::{Context, Result};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse a comma-separated seed list. Accepts decimal or `0x`-prefixed hex.
pub fn parse_seeds(s: &str) -> Result<Vec<u64>> {
    split_csv(s)
        .iter()
        .map(|token| parse_seed(token).with_context(|| format!("invalid seed '{token}'")))
        .collect()
}

fn parse_seed(token: &str) -> Result<u64> {
    let seed = match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16)?,
        None => token.parse()?,
    };
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_drops_empties() {
        assert_eq!(split_csv(" smoke, ,journey-walk,"), ["smoke", "journey-walk"]);
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn parses_decimal_and_hex_seeds() {
        assert_eq!(parse_seeds("1337, 0xFF,0X10").unwrap(), [1337, 255, 16]);
    }

    #[test]
    fn rejects_garbage_seed() {
        let err = parse_seeds("7,banana").unwrap_err();
        assert!(format!("{err:#}").contains("banana"));
    }
}
