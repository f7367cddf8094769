use serde::Serialize;

/// One contact as the directory reports it, normalized to plain fields.
/// A contact may carry any number of email addresses; grouping fans it out
/// per address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryContact {
    pub id: String,
    pub display_name: String,
    pub given_name: String,
    pub surname: String,
    pub job_title: String,
    pub company_name: String,
    pub mobile_phone: String,
    pub business_phones: Vec<String>,
    pub email_addresses: Vec<String>,
}

/// One contact entry inside a domain group, pinned to a single email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedContact {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub given_name: String,
    pub surname: String,
    pub job_title: String,
    pub company_name: String,
    pub mobile_phone: String,
    pub business_phones: Vec<String>,
}

impl GroupedContact {
    pub fn for_email(contact: &DirectoryContact, email: &str) -> Self {
        Self {
            id: contact.id.clone(),
            display_name: contact.display_name.clone(),
            email: email.to_string(),
            given_name: contact.given_name.clone(),
            surname: contact.surname.clone(),
            job_title: contact.job_title.clone(),
            company_name: contact.company_name.clone(),
            mobile_phone: contact.mobile_phone.clone(),
            business_phones: contact.business_phones.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainGroup {
    pub domain: String,
    pub count: usize,
    pub contacts: Vec<GroupedContact>,
}

/// Contacts fanned out per email address and bucketed by domain, groups in
/// lexicographic domain order. `total_contacts` counts group entries, so a
/// contact with addresses in N domains is counted N times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedContacts {
    pub total_domains: usize,
    pub total_contacts: usize,
    pub data: Vec<DomainGroup>,
}
