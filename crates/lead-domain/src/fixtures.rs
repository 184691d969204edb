// fixtures.rs
use crate::{Campaign, CampaignMetrics, CampaignStatus, Contact, ContactStatus, Conversation, ConversationStatus,
            Frequency, LeadDataset, Message, MessageDirection, MessageKind, Schedule};
use chrono::{Duration, Utc};
use serde_json::json;

pub struct DomainFixtures;

impl DomainFixtures {
    /// Contactos de ejemplo, los mismos cinco leads del dataset de demo.
    pub fn sample_contacts() -> Vec<Contact> {
        let now = Utc::now();
        let sarah = Contact::new("1", "Sarah Johnson", "+1-555-0123", "LinkedIn", now - Duration::days(5))
            .unwrap()
            .with_email("sarah.johnson@techcorp.com")
            .with_company("TechCorp Solutions")
            .with_status(ContactStatus::Qualified)
            .with_lead_score(85)
            .unwrap()
            .with_last_contact(now - Duration::days(2))
            .with_next_followup(now + Duration::days(1))
            .with_tags(["high-value", "enterprise", "decision-maker"].map(String::from))
            .with_conversation("conv-1");
        let michael = Contact::new("2", "Michael Chen", "+1-555-0124", "Website", now - Duration::days(3))
            .unwrap()
            .with_email("mike@startupco.io")
            .with_company("StartupCo")
            .with_status(ContactStatus::Followup)
            .with_lead_score(72)
            .unwrap()
            .with_last_contact(now - Duration::days(1))
            .with_next_followup(now)
            .with_tags(["startup", "budget-conscious"].map(String::from))
            .with_conversation("conv-2");
        let emily = Contact::new("3", "Emily Rodriguez", "+1-555-0125", "Referral", now - Duration::days(1))
            .unwrap()
            .with_email("emily@designstudio.com")
            .with_company("Creative Design Studio")
            .with_status(ContactStatus::New)
            .with_lead_score(45)
            .unwrap()
            .with_tags(["creative", "small-business"].map(String::from));
        let david = Contact::new("4", "David Park", "+1-555-0126", "Cold Outreach", now - Duration::days(10))
            .unwrap()
            .with_email("david@enterprise.com")
            .with_company("Enterprise Corp")
            .with_status(ContactStatus::Cold)
            .with_lead_score(28)
            .unwrap()
            .with_last_contact(now - Duration::days(7))
            .with_tags(["enterprise", "unresponsive"].map(String::from))
            .with_conversation("conv-3");
        let lisa = Contact::new("5", "Lisa Thompson", "+1-555-0127", "Event", now)
            .unwrap()
            .with_email("lisa@consultancy.com")
            .with_company("Thompson Consultancy")
            .with_status(ContactStatus::Contacted)
            .with_lead_score(67)
            .unwrap()
            .with_last_contact(now)
            .with_tags(["consultant", "interested"].map(String::from))
            .with_conversation("conv-4");
        vec![sarah, michael, emily, david, lisa]
    }

    /// La conversación activa de demo, con su hilo y los datos de
    /// calificación que alimentan la evaluación de condiciones.
    pub fn sample_conversations() -> Vec<Conversation> {
        let now = Utc::now();
        let t = now - Duration::days(2);
        let m1 = Message::new("msg-1",
                              "conv-1",
                              "Hi Sarah! I noticed you're interested in automation solutions for TechCorp. \
                               Are you available for a quick 15-minute demo this week?",
                              MessageDirection::Sent,
                              t)
            .unwrap()
            .with_kind(MessageKind::Template)
            .automated();
        let m2 = Message::new("msg-2",
                              "conv-1",
                              "That sounds interesting! What kind of automation do you specialize in?",
                              MessageDirection::Received,
                              t + Duration::minutes(4))
            .unwrap();
        let m3 = Message::new("msg-3",
                              "conv-1",
                              "We focus on WhatsApp automation for lead generation. \
                               What's your current monthly lead volume?",
                              MessageDirection::Sent,
                              t + Duration::minutes(6))
            .unwrap()
            .automated();

        let conv = Conversation::new("conv-1", "1", now - Duration::days(5))
            .unwrap()
            .with_status(ConversationStatus::Active)
            .with_flow_cursor("lead-qualification", Some("step-2".to_string()))
            .with_lead_score(85)
            .unwrap()
            .with_qualification("budget", json!("enterprise"))
            .with_qualification("timeline", json!("immediate"))
            .with_qualification("authority", json!("decision-maker"))
            .with_message(m1)
            .unwrap()
            .with_message(m2)
            .unwrap()
            .with_message(m3)
            .unwrap();
        vec![conv]
    }

    pub fn sample_campaigns() -> Vec<Campaign> {
        let now = Utc::now();
        let q4 = Campaign::new("camp-1",
                               "Q4 Lead Generation Campaign",
                               "lead-qualification",
                               ["1", "2", "4"].map(String::from),
                               now - Duration::days(7))
            .unwrap()
            .with_description("Target enterprise clients for end-of-year budget allocation")
            .with_status(CampaignStatus::Running)
            .with_schedule(Schedule::new(now - Duration::days(7), Some(now + Duration::days(30)), Frequency::Daily).unwrap())
            .with_metrics(CampaignMetrics::new(150, 145, 48, 12).unwrap());
        let startups = Campaign::new("camp-2",
                                     "Startup Outreach",
                                     "lead-qualification",
                                     ["2", "3"].map(String::from),
                                     now - Duration::days(14))
            .unwrap()
            .with_description("Focused campaign for startup segment")
            .with_status(CampaignStatus::Completed)
            .with_metrics(CampaignMetrics::new(75, 72, 25, 8).unwrap());
        vec![q4, startups]
    }

    /// Dataset completo y coherente, listo para consultas y métricas.
    pub fn sample_dataset() -> LeadDataset {
        LeadDataset::new(Self::sample_contacts(), Self::sample_conversations(), Self::sample_campaigns()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_dataset_is_coherent() {
        let ds = DomainFixtures::sample_dataset();
        assert_eq!(ds.contacts().len(), 5);
        assert_eq!(ds.conversations().len(), 1);
        assert_eq!(ds.campaigns().len(), 2);
        // la conversación de demo apunta a un contacto real
        let conv = ds.conversation("conv-1").expect("conv-1");
        assert!(ds.contact(conv.contact_id()).is_some());
        assert_eq!(conv.current_step(), Some("step-2"));
    }
}
