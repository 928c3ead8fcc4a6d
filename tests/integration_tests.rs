// Integration tests for Gift Draw

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use gift_draw::core::{draw_forest, MatchError, Matcher};
use gift_draw::models::{Assignment, Family, Person};
use gift_draw::services::{load_forest, render_text, InputFormat, LoadError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn assert_valid(family: &Family, assignment: &Assignment) {
    let members = family.all_members();
    assert_eq!(assignment.len(), members.len());

    let mut recipients = HashSet::new();
    for pairing in assignment {
        assert_ne!(pairing.giver, pairing.recipient);

        let relatives = family
            .direct_members_of(pairing.giver.family().unwrap())
            .unwrap();
        assert!(
            !relatives.contains(&pairing.recipient),
            "{} drew their relative {}",
            pairing.giver,
            pairing.recipient
        );

        assert!(recipients.insert(pairing.recipient.clone()));
    }

    let everyone: HashSet<Person> = members.into_iter().collect();
    assert_eq!(recipients, everyone);
}

#[test]
fn test_integration_smiths_and_cousins() {
    let mut cousins = Family::named("Cousins");
    cousins.add_member("Carl", "Jones").unwrap();
    cousins.add_member("Dana", "Jones").unwrap();

    let mut smiths = Family::named("Smiths");
    smiths.add_member("Alice", "Smith").unwrap();
    smiths.add_member("Bob", "Smith").unwrap();
    smiths.add_family(cousins).unwrap();

    let assignment = Matcher::default().pair_up_with_entropy(&smiths).unwrap();
    assert_valid(&smiths, &assignment);

    // Each side can only draw from the other side
    for pairing in &assignment {
        assert_ne!(pairing.giver.last_name(), pairing.recipient.last_name());
    }
}

#[test]
fn test_integration_single_member_fails_for_any_bound() {
    let mut family = Family::named("Solo");
    family.add_member("Sam", "Solo").unwrap();

    for bound in 1..=10 {
        let result = Matcher::new(bound).pair_up(&family, &mut StdRng::seed_from_u64(bound as u64));
        match result {
            Err(MatchError::ExhaustedRetries { attempts, members }) => {
                assert_eq!(attempts, bound);
                assert_eq!(members, 1);
            }
            Ok(_) => panic!("single member family must not pair"),
        }
    }
}

#[test]
fn test_integration_load_sample_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/families.xml");
    let families = load_forest(&path, InputFormat::Auto).unwrap();

    assert_eq!(families.len(), 2);
    assert_eq!(families[0].name(), Some("Smiths"));
    assert_eq!(families[0].all_members().len(), 6);

    let table = draw_forest(&Matcher::default(), &families, &mut StdRng::seed_from_u64(2024)).unwrap();
    assert_eq!(table.len(), 2);

    for (family, draw) in families.iter().zip(table.iter()) {
        assert_valid(family, &draw.pairings);
    }

    let text = render_text(&table);
    assert_eq!(text.matches(" -> ").count(), 10);
}

#[test]
fn test_integration_load_json_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"families": [{{"name": "Doe", "members": ["Jane Doe"], "subfamilies": [{{"members": ["John Smith"]}}]}}]}}"#
    )
    .unwrap();

    let families = load_forest(file.path(), InputFormat::Auto).unwrap();
    let members = families[0].all_members();

    assert_eq!(members.len(), 2);
    assert_ne!(members[0], members[1]);
}

#[test]
fn test_integration_malformed_member_in_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(file, "[[families]]\nname = \"Doe\"\nmembers = [\"Jane\"]\n").unwrap();

    let err = load_forest(file.path(), InputFormat::Auto).unwrap_err();
    assert!(matches!(err, LoadError::Family(_)));
}

#[test]
fn test_integration_retries_until_every_giver_is_paired() {
    let record: gift_draw::FamilyRecord = serde_json::from_str(
        r#"{
            "name": "Lees",
            "members": ["Jack Lee"],
            "subfamilies": [
                { "members": ["Grace Lee"] },
                { "members": ["Henry Park", "Iris Park"] }
            ]
        }"#,
    )
    .unwrap();
    let family = Family::from_record(&record).unwrap();

    let first_attempt_failures = (0..100)
        .filter(|seed| {
            Matcher::new(1)
                .pair_up(&family, &mut StdRng::seed_from_u64(*seed))
                .is_err()
        })
        .count();
    assert!(first_attempt_failures > 0);

    for seed in 0..100 {
        let assignment = Matcher::default()
            .pair_up(&family, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert_valid(&family, &assignment);
    }
}
