//! Fake data generation backed by the `fake` crate.
//!
//! Generator names follow the Python Faker provider names so existing
//! templates keep working (`boolean`, `pyint`, `password`, `email`, ...).

use chrono::{NaiveDate, TimeDelta, Utc};
use fake::faker::address::en::{CityName, CountryName, StreetName, ZipCode};
use fake::faker::boolean::en::Boolean;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{DomainSuffix, FreeEmail, IPv4, IPv6, SafeEmail, Username};
use fake::faker::lorem::en::{Word, Words};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::{Fake, Faker};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use strsim::levenshtein;

use super::{ArgumentReader, Arguments, ValueGenerator};
use crate::core::DotenverError;

/// Maximum Levenshtein distance, as a percentage of the name length, for
/// "did you mean" suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Every generator name understood by [`FakerGenerator`].
pub const GENERATORS: &[&str] = &[
    "boolean",
    "city",
    "company",
    "country",
    "date",
    "domain_name",
    "email",
    "first_name",
    "free_email",
    "hex_token",
    "ipv4",
    "ipv6",
    "last_name",
    "name",
    "password",
    "phone_number",
    "postcode",
    "pyint",
    "pystr",
    "random_int",
    "safe_email",
    "sentence",
    "sha256",
    "street_name",
    "url",
    "user_name",
    "uuid4",
    "word",
];

/// Upper bound for generated string lengths.
const MAX_CHARS: usize = 4096;
/// Upper bound for `sentence(nb_words=...)`.
const MAX_WORDS: usize = 1024;
/// Upper bound for `hex_token(nbytes=...)`.
const MAX_BYTES: usize = 1024;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SPECIAL: &[u8] = b"!@#$%^&*()_+";

/// Production [`ValueGenerator`] producing random data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakerGenerator;

impl FakerGenerator {
    /// Create a new generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Closest known generator name to `generator`, if similar enough.
    #[must_use]
    pub fn suggest(generator: &str) -> Option<&'static str> {
        let max_distance = (generator.len() * SIMILARITY_THRESHOLD_PERCENT / 100).max(1);
        GENERATORS
            .iter()
            .map(|candidate| (levenshtein(generator, candidate), *candidate))
            .filter(|(distance, _)| *distance <= max_distance)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate)
    }
}

impl ValueGenerator for FakerGenerator {
    fn generate(&self, generator: &str, arguments: &Arguments) -> Result<String, DotenverError> {
        let mut args = ArgumentReader::new(generator, arguments);

        let value: String = match generator {
            "boolean" => {
                let chance = args.int("chance_of_getting_true", 50)?;
                let chance = u8::try_from(chance)
                    .ok()
                    .filter(|chance| *chance <= 100)
                    .ok_or_else(|| args.out_of_range("chance_of_getting_true", "0 to 100"))?;
                let value: bool = Boolean(chance).fake();
                String::from(if value { "True" } else { "False" })
            }
            "pyint" => {
                let min = args.int("min_value", 0)?;
                let max = args.int("max_value", 9999)?;
                random_int(&args, ("min_value", min), max)?
            }
            "random_int" => {
                let min = args.int("min", 0)?;
                let max = args.int("max", 9999)?;
                random_int(&args, ("min", min), max)?
            }
            "pystr" => {
                let min = args.bounded_count("min_chars", 20, MAX_CHARS)?;
                let max = args.bounded_count("max_chars", 20, MAX_CHARS)?;
                if min > max {
                    return Err(args.out_of_range("min_chars", "a value not above max_chars"));
                }
                let length = (min..=max).fake::<usize>();
                let letters = [LOWERCASE, UPPERCASE].concat();
                random_string(&letters, length)
            }
            "password" => {
                let length = args.bounded_count("length", 10, MAX_CHARS)?;
                let mut charset = Vec::new();
                if args.flag("lower_case", true)? {
                    charset.extend_from_slice(LOWERCASE);
                }
                if args.flag("upper_case", true)? {
                    charset.extend_from_slice(UPPERCASE);
                }
                if args.flag("digits", true)? {
                    charset.extend_from_slice(DIGITS);
                }
                if args.flag("special_chars", true)? {
                    charset.extend_from_slice(SPECIAL);
                }
                if charset.is_empty() {
                    return Err(args.out_of_range("lower_case", "at least one character class"));
                }
                random_string(&charset, length)
            }
            "word" => Word().fake(),
            "sentence" => {
                let words = args.bounded_count("nb_words", 6, MAX_WORDS)?.max(1);
                sentence(&Words(words..words + 1).fake::<Vec<String>>())
            }
            "name" => Name().fake(),
            "first_name" => FirstName().fake(),
            "last_name" => LastName().fake(),
            "user_name" => Username().fake(),
            "email" | "free_email" => FreeEmail().fake(),
            "safe_email" => SafeEmail().fake(),
            "company" => CompanyName().fake(),
            "city" => CityName().fake(),
            "country" => CountryName().fake(),
            "street_name" => StreetName().fake(),
            "postcode" => ZipCode().fake(),
            "phone_number" => PhoneNumber().fake(),
            "ipv4" => IPv4().fake(),
            "ipv6" => IPv6().fake(),
            "domain_name" => domain_name(),
            "url" => format!("https://www.{}/", domain_name()),
            "uuid4" => uuid::Uuid::new_v4().to_string(),
            "sha256" => hex::encode(Sha256::digest(random_bytes(64))),
            "hex_token" => hex::encode(random_bytes(args.bounded_count("nbytes", 32, MAX_BYTES)?)),
            "date" => {
                let pattern = args.string("pattern", "%Y-%m-%d")?;
                random_date(&args, &pattern)?
            }
            _ => {
                return Err(DotenverError::UnknownGenerator {
                    generator: generator.to_string(),
                    suggestion: Self::suggest(generator).map(str::to_string),
                });
            }
        };

        args.finish()?;
        Ok(value)
    }
}

fn random_int(
    args: &ArgumentReader<'_>,
    (min_key, min): (&str, i64),
    max: i64,
) -> Result<String, DotenverError> {
    if min > max {
        return Err(args.out_of_range(min_key, "a value not above the maximum"));
    }
    Ok((min..=max).fake::<i64>().to_string())
}

fn random_string(charset: &[u8], length: usize) -> String {
    (0..length).map(|_| char::from(charset[(0..charset.len()).fake::<usize>()])).collect()
}

fn random_bytes(count: usize) -> Vec<u8> {
    (0..count).map(|_| Faker.fake::<u8>()).collect()
}

fn sentence(words: &[String]) -> String {
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get(..1) {
        let capitalized = first.to_uppercase();
        sentence.replace_range(..1, &capitalized);
    }
    sentence.push('.');
    sentence
}

fn domain_name() -> String {
    format!("{}.{}", Word().fake::<String>(), DomainSuffix().fake::<String>())
}

fn random_date(args: &ArgumentReader<'_>, pattern: &str) -> Result<String, DotenverError> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
        .ok_or_else(|| args.out_of_range("pattern", "a date after 1970-01-01"))?;
    let span = (Utc::now().date_naive() - epoch).num_days().max(0);
    let date = epoch + TimeDelta::days((0..=span).fake::<i64>());

    let mut formatted = String::new();
    write!(formatted, "{}", date.format(pattern))
        .map_err(|_| args.out_of_range("pattern", "a valid strftime format"))?;
    Ok(formatted)
}
