use std::collections::HashSet;

use crate::models::Person;

/// Check whether `candidate` may be drawn by `giver`
///
/// `relatives` are the direct members of the giver's own family, which
/// normally includes the giver.
#[inline]
pub fn is_eligible(
    candidate: &Person,
    giver: &Person,
    relatives: &[Person],
    claimed: &HashSet<&Person>,
) -> bool {
    // Never yourself
    if candidate == giver {
        return false;
    }

    // Nobody from your immediate family
    if relatives.contains(candidate) {
        return false;
    }

    // Each person is drawn once
    !claimed.contains(candidate)
}

/// Everyone `giver` could still draw in the current attempt
///
/// People sharing a name are one candidate.
pub fn candidates_for<'a>(
    giver: &Person,
    relatives: &[Person],
    members: &'a [Person],
    claimed: &HashSet<&Person>,
) -> Vec<&'a Person> {
    let mut seen: HashSet<&Person> = HashSet::with_capacity(members.len());

    members
        .iter()
        .filter(|member| is_eligible(member, giver, relatives, claimed))
        .filter(|member| seen.insert(*member))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(names: &[(&str, &str)]) -> Vec<Person> {
        names.iter().map(|(f, l)| Person::new(*f, *l)).collect()
    }

    #[test]
    fn test_excludes_self_and_relatives() {
        let smiths = people(&[("Alice", "Smith"), ("Bob", "Smith")]);
        let mut members = smiths.clone();
        members.extend(people(&[("Carl", "Jones"), ("Dana", "Jones")]));

        let candidates = candidates_for(&smiths[0], &smiths, &members, &HashSet::new());

        let names: Vec<String> = candidates.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["Carl Jones", "Dana Jones"]);
    }

    #[test]
    fn test_excludes_claimed() {
        let members = people(&[("Alice", "Smith"), ("Carl", "Jones"), ("Dana", "Jones")]);
        let claimed: HashSet<&Person> = [&members[1]].into_iter().collect();

        let candidates = candidates_for(&members[0], &members[..1], &members, &claimed);
        assert_eq!(candidates, vec![&members[2]]);
    }

    #[test]
    fn test_self_excluded_without_relatives() {
        let giver = Person::new("Alice", "Smith");
        assert!(!is_eligible(&giver, &giver, &[], &HashSet::new()));
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let members = people(&[("Alice", "Smith"), ("Carl", "Jones"), ("Carl", "Jones")]);
        let candidates = candidates_for(&members[0], &members[..1], &members, &HashSet::new());
        assert_eq!(candidates.len(), 1);
    }
}
