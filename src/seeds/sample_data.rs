// Bundled sample data, served when the CRM backend cannot be reached
use crate::models::{Course, FollowUp, Lead, Role, User};

struct SampleCounselor {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    department: &'static str,
}

const COUNSELORS: &[SampleCounselor] = &[
    SampleCounselor { id: "1", name: "Dr. Priya Sharma", email: "priya.sharma@dmhca.edu", phone: "+91 9876543210", department: "Admissions" },
    SampleCounselor { id: "2", name: "Mr. Rajesh Kumar", email: "rajesh.kumar@dmhca.edu", phone: "+91 9876543211", department: "Student Affairs" },
    SampleCounselor { id: "3", name: "Ms. Sunita Reddy", email: "sunita.reddy@dmhca.edu", phone: "+91 9876543212", department: "Course Coordinator" },
    SampleCounselor { id: "4", name: "Dr. Amit Patel", email: "amit.patel@dmhca.edu", phone: "+91 9876543213", department: "Fellowship Programs" },
];

/// Sample counselors as users: role counselor, branch Hyderabad
pub fn sample_users() -> Vec<User> {
    COUNSELORS
        .iter()
        .map(|c| User {
            id: c.id.to_string(),
            name: c.name.to_string(),
            email: c.email.to_string(),
            phone: Some(c.phone.to_string()),
            role: Role::Counselor,
            reports_to: None,
            department: Some(c.department.to_string()),
            branch: Some("Hyderabad".to_string()),
            preferred_language: Some("en".to_string()),
            is_active: true,
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
        })
        .collect()
}

fn course(id: &str, name: &str, category: &str, price: f64, duration: &str, eligibility: &str, description: &str) -> Course {
    Course {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price,
        duration: duration.to_string(),
        eligibility: eligibility.to_string(),
        description: description.to_string(),
        is_active: true,
    }
}

pub fn sample_courses() -> Vec<Course> {
    vec![
        // Fellowship Programs
        course("1", "Fellowship in Emergency Medicine", "Fellowship", 450000.0, "2 Years", "MBBS with 1 year experience", "Comprehensive fellowship program in emergency medicine with hands-on training"),
        course("2", "Fellowship in Critical Care Medicine", "Fellowship", 500000.0, "2 Years", "MD/MS or DNB", "Advanced training in intensive care unit management and critical care protocols"),
        course("3", "Fellowship in Interventional Cardiology", "Fellowship", 650000.0, "1 Year", "DM Cardiology or equivalent", "Specialized training in cardiac interventional procedures"),
        course("4", "Fellowship in Trauma Surgery", "Fellowship", 480000.0, "18 Months", "MS General Surgery", "Comprehensive trauma surgery training with emergency protocols"),
        course("5", "Fellowship in Pediatric Surgery", "Fellowship", 520000.0, "2 Years", "MS General Surgery with pediatric experience", "Specialized pediatric surgical procedures and patient care"),
        // PG Diploma Programs
        course("6", "PG Diploma in Hospital Administration", "PG Diploma", 180000.0, "1 Year", "MBBS or MBA", "Healthcare management and hospital administration skills"),
        course("7", "PG Diploma in Medical Ethics", "PG Diploma", 120000.0, "6 Months", "MBBS or healthcare background", "Ethics in medical practice and healthcare delivery"),
        course("8", "PG Diploma in Public Health", "PG Diploma", 150000.0, "1 Year", "MBBS or health sciences degree", "Community health management and public health policies"),
        course("9", "PG Diploma in Clinical Research", "PG Diploma", 200000.0, "1 Year", "MBBS, BDS, or life sciences graduate", "Clinical trial management and research methodologies"),
        course("10", "PG Diploma in Medical Education", "PG Diploma", 160000.0, "1 Year", "Medical degree with teaching interest", "Medical teaching methodologies and curriculum development"),
        // Certification Programs
        course("11", "Basic Life Support (BLS) Certification", "Certification", 5000.0, "2 Days", "Healthcare professionals", "Essential life-saving techniques and emergency response"),
        course("12", "Advanced Cardiac Life Support (ACLS)", "Certification", 12000.0, "3 Days", "BLS certified healthcare professionals", "Advanced cardiovascular emergency procedures"),
        course("13", "Pediatric Advanced Life Support (PALS)", "Certification", 15000.0, "2 Days", "ACLS certified with pediatric experience", "Pediatric emergency care and resuscitation techniques"),
        course("14", "Medical Simulation Training", "Certification", 25000.0, "5 Days", "Medical professionals", "Hands-on simulation-based medical training"),
        course("15", "Infection Control Certification", "Certification", 8000.0, "2 Days", "Healthcare workers", "Hospital infection prevention and control protocols"),
    ]
}

struct SampleLead {
    id: &'static str,
    full_name: &'static str,
    email: &'static str,
    phone: &'static str,
    country: &'static str,
    qualification: &'static str,
    source: &'static str,
    course_interest: &'static str,
    status: &'static str,
    follow_up_date: &'static str,
    created_at: &'static str,
    updated_at: &'static str,
    notes: &'static str,
}

const LEADS: &[SampleLead] = &[
    SampleLead {
        id: "5794",
        full_name: "Hesham ibrahim",
        email: "heshamnoh@hotmail.com",
        phone: "+971507313042",
        country: "AE",
        qualification: "MD/MS/DNB",
        source: "Facebook Ads",
        course_interest: "",
        status: "Followup",
        follow_up_date: "2025-06-16T10:30",
        created_at: "2025-03-09T22:11",
        updated_at: "2025-06-12T12:52",
        notes: "sd , Didn't answer the call\nnot answering 5/5/25\nnot responding 26/5/25\nna   12/6/25",
    },
    SampleLead {
        id: "16810",
        full_name: "vishnu harikrishna",
        email: "vishnuharikrishnan1210@gmail.com",
        phone: "9605468466",
        country: "IN",
        qualification: "MD/MS/DNB",
        source: "",
        course_interest: "Fellowship in Arthroscopy & Arthroplasty",
        status: "",
        follow_up_date: "2025-05-31T12:30",
        created_at: "2025-05-31T11:05",
        updated_at: "2025-05-31T11:05",
        notes: "call ended 31/5/25",
    },
    SampleLead {
        id: "16713",
        full_name: "Dr Anuashraf",
        email: "dranuashraf@gmail.com",
        phone: "+919400442325",
        country: "IN",
        qualification: "Others",
        source: "Facebook Ads",
        course_interest: "",
        status: "Followup",
        follow_up_date: "2025-06-13T10:30",
        created_at: "2025-05-30T06:47",
        updated_at: "2025-06-10T10:47",
        notes: "details shared on whatsapp 30/5/25\nasking for more discounts (asking for 50k)\nswitch off 10/6/25",
    },
    SampleLead {
        id: "2139",
        full_name: "Mahendra Pandey",
        email: "",
        phone: "919117987485",
        country: "Diabetology / Endocrinology",
        qualification: "+919117987485,",
        source: "",
        course_interest: "",
        status: "Followup",
        follow_up_date: "2025-06-16T06:30",
        created_at: "2025-02-19T08:18",
        updated_at: "2025-06-12T10:05",
        notes: "NOT RESPONDING ON CALL ,DETAILS SENT ON WHATSAPP 6/5/25\nNA  12/6/25",
    },
    SampleLead {
        id: "14416",
        full_name: "Sushree Sangita Mallick (Repeat Lead)",
        email: "ssmallick499@gmail.com",
        phone: "07077065864",
        country: "",
        qualification: "",
        source: "Website",
        course_interest: "Pg Diploma In Dermatology",
        status: "Followup",
        follow_up_date: "2025-06-16T06:30",
        created_at: "2025-05-07T06:37",
        updated_at: "2025-06-12T13:16",
        notes: "not answering , details sent on whatsapp 7/5/25\ncall again later 29/5/25\nna 12/6/25",
    },
];

/// The sample leads are assigned to a counselor by name, not by user id
const SAMPLE_ASSIGNEE: &str = "Santhosh";

pub fn sample_leads() -> Vec<Lead> {
    LEADS
        .iter()
        .map(|l| Lead {
            id: l.id.to_string(),
            full_name: l.full_name.to_string(),
            email: l.email.to_string(),
            phone: l.phone.to_string(),
            country: l.country.to_string(),
            qualification: l.qualification.to_string(),
            source: l.source.to_string(),
            course_interest: l.course_interest.to_string(),
            status: l.status.to_string(),
            assigned_to: SAMPLE_ASSIGNEE.to_string(),
            follow_up_date: Some(l.follow_up_date.to_string()),
            created_at: Some(l.created_at.to_string()),
            updated_at: Some(l.updated_at.to_string()),
            fees: None,
            total_fees: None,
            fees_collected: None,
            notes: Some(l.notes.to_string()),
            notes_list: Vec::new(),
        })
        .collect()
}

pub fn sample_follow_ups() -> Vec<FollowUp> {
    vec![
        FollowUp {
            id: "1".to_string(),
            lead_id: "5794".to_string(),
            date: "2025-06-16T10:30".to_string(),
            note: "Called, no answer. Will try again tomorrow.".to_string(),
            counselor: SAMPLE_ASSIGNEE.to_string(),
            next_reminder_date: Some("2025-06-17T10:30".to_string()),
            completed: false,
            whatsapp_sent: false,
            created_at: Some("2025-06-16T10:31".to_string()),
        },
        FollowUp {
            id: "2".to_string(),
            lead_id: "16713".to_string(),
            date: "2025-06-13T10:30".to_string(),
            note: "Requested more discount, follow up in 2 days.".to_string(),
            counselor: SAMPLE_ASSIGNEE.to_string(),
            next_reminder_date: Some("2025-06-15T10:30".to_string()),
            completed: false,
            whatsapp_sent: false,
            created_at: Some("2025-06-13T10:31".to_string()),
        },
    ]
}
