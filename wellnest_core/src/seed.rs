//! Static mock data the app starts with. Nothing here is ever mutated; user
//! additions live in overlay state layered on top.

use crate::map::Coordinates;
use crate::models::{
    Comment, Doctor, Hospital, MedicalRecord, MedicalVisit, Post, PostId, Reaction, Review,
    ReviewKeyword, UserRef, VisitKind, VisitType,
};

pub const DEFAULT_USER_NAME: &str = "김건강";
pub const CURRENT_USER_NAME: &str = "나";
pub const CURRENT_USER_AVATAR: &str =
    "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=100&h=100&fit=crop";

const HOSPITAL_IMAGE: &str =
    "https://images.unsplash.com/photo-1519494026892-80bbd2d6fd0d?w=200&q=80";

pub fn current_user() -> UserRef {
    UserRef::new(CURRENT_USER_NAME, CURRENT_USER_AVATAR)
}

#[allow(clippy::too_many_arguments)]
fn hospital(
    id: u32,
    name: &str,
    department: &str,
    distance: &str,
    status: &str,
    rating: f32,
    reviews: u32,
    address: &str,
    coordinates: Option<Coordinates>,
) -> Hospital {
    Hospital {
        id,
        name: name.into(),
        department: department.into(),
        specialty_text: format!("{department} 전문의 진료"),
        hours: "평일 09:00 - 18:00".into(),
        distance: distance.into(),
        address: address.into(),
        phone: format!("02-555-{:04}", 1000 + id),
        description: format!("{name}은(는) {department} 진료를 제공합니다."),
        image_url: HOSPITAL_IMAGE.into(),
        coordinates,
        rating,
        reviews,
        available_now: status == "진료중",
        status: status.into(),
    }
}

pub fn hospitals() -> Vec<Hospital> {
    vec![
        hospital(
            1,
            "매일건강의원",
            "내과",
            "250m",
            "진료중",
            4.8,
            234,
            "서울시 강남구 역삼동 123-45",
            Some(Coordinates::new(37.5006, 127.0364)),
        ),
        hospital(
            2,
            "365클리닉 강남본점",
            "가정의학과",
            "420m",
            "진료중",
            4.6,
            189,
            "서울시 강남구 테헤란로 234",
            Some(Coordinates::new(37.5045, 127.0490)),
        ),
        hospital(
            3,
            "사랑니쏙쏙 강남본점",
            "치과",
            "580m",
            "야간진료",
            4.9,
            456,
            "서울시 강남구 역삼동 567-89",
            None,
        ),
        hospital(
            4,
            "강남예쁜이치과의원",
            "치과",
            "720m",
            "진료중",
            4.7,
            312,
            "서울시 강남구 선릉로 345",
            Some(Coordinates::new(37.5040, 127.0489)),
        ),
    ]
}

pub fn doctors() -> Vec<Doctor> {
    let doctor = |id, name: &str, specialty: &str, experience: &str, image: &str| Doctor {
        id,
        name: name.into(),
        specialty: specialty.into(),
        experience: experience.into(),
        image: image.into(),
    };
    vec![
        doctor(
            1,
            "김건강 원장",
            "내과 전문의",
            "경력 15년",
            "https://images.unsplash.com/photo-1559839734-2b71ea197ec2?w=200&q=80",
        ),
        doctor(
            2,
            "이웰니스 원장",
            "가정의학과 전문의",
            "경력 12년",
            "https://images.unsplash.com/photo-1594824476967-48c8b964273f?w=200&q=80",
        ),
        doctor(
            3,
            "박진료 원장",
            "내과 전문의",
            "경력 10년",
            "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?w=200&q=80",
        ),
    ]
}

pub fn review_keywords() -> Vec<ReviewKeyword> {
    [("친절해요", 92), ("진료를 잘해요", 85), ("시설이 깨끗해요", 77)]
        .into_iter()
        .map(|(label, percent)| ReviewKeyword {
            label: label.into(),
            percent,
        })
        .collect()
}

fn family(name: &str, photo: &str) -> UserRef {
    UserRef::new(
        name,
        format!("https://images.unsplash.com/{photo}?w=100&h=100&fit=crop"),
    )
}

fn comment(author: UserRef, text: &str, timestamp: &str) -> Comment {
    Comment {
        author,
        text: text.into(),
        timestamp: timestamp.into(),
    }
}

pub fn posts() -> Vec<Post> {
    let mom = family("엄마", "photo-1494790108377-be9c29b29330");
    let dad = family("아빠", "photo-1500648767791-00dcc994a43e");
    let sister = family("동생", "photo-1438761681033-6461ffad8d80");

    vec![
        Post {
            id: PostId(1),
            image: "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=800".into(),
            badge: Some("오늘의 운동".into()),
            author: mom.clone(),
            caption: "아침 산책 다녀왔어요".into(),
            text_overlay: Some("만보 달성!".into()),
            location: Some("양재천".into()),
            weather: Some("맑음 12°C".into()),
            time: Some("오전 7:30".into()),
            health: Some("10,240 걸음".into()),
            comments: vec![
                comment(dad.clone(), "대단해요!", "8:02"),
                comment(sister.clone(), "저도 내일 같이 가요", "8:15"),
            ],
            reactions: vec![Reaction {
                emoji: "❤️".into(),
                users: vec![dad.clone()],
            }],
        },
        Post {
            id: PostId(2),
            image: "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=800".into(),
            badge: None,
            author: dad.clone(),
            caption: "건강한 점심 식단".into(),
            text_overlay: None,
            location: Some("회사 근처".into()),
            weather: None,
            time: Some("오후 12:20".into()),
            health: Some("520 kcal".into()),
            comments: vec![comment(mom.clone(), "맛있어 보여요", "12:40")],
            reactions: vec![
                Reaction {
                    emoji: "👍".into(),
                    users: vec![mom.clone(), sister.clone()],
                },
                Reaction {
                    emoji: "😊".into(),
                    users: vec![sister.clone()],
                },
            ],
        },
        Post {
            id: PostId(3),
            image: "https://images.unsplash.com/photo-1576091160550-2173dba999ef?w=800".into(),
            badge: Some("정기검진".into()),
            author: sister.clone(),
            caption: "건강검진 결과 모두 정상이에요".into(),
            text_overlay: Some("검진 완료".into()),
            location: Some("서울대학교병원".into()),
            weather: Some("흐림 9°C".into()),
            time: None,
            health: Some("혈압 118/76".into()),
            comments: Vec::new(),
            reactions: vec![Reaction {
                emoji: "🎉".into(),
                users: vec![mom.clone(), dad.clone()],
            }],
        },
        Post {
            id: PostId(4),
            image: "https://images.unsplash.com/photo-1506126613408-eca07ce68773?w=800".into(),
            badge: None,
            author: mom,
            caption: "저녁 요가 30분".into(),
            text_overlay: None,
            location: None,
            weather: None,
            time: Some("오후 9:00".into()),
            health: None,
            comments: Vec::new(),
            reactions: Vec::new(),
        },
    ]
}

pub fn medical_records() -> Vec<MedicalRecord> {
    let record = |id: u32, patient: UserRef, hospital: &str, date: &str, time: &str, doctor: &str, memo: &str| {
        MedicalRecord {
            id,
            code: format!("REC-2024-{id:03}"),
            patient,
            hospital_name: hospital.into(),
            visit_date: date.into(),
            visit_time: time.into(),
            doctor: doctor.into(),
            memo: memo.into(),
        }
    };
    vec![
        record(
            1,
            family("김웰리", "photo-1494790108377-be9c29b29330"),
            "서울대학교병원",
            "2024년 11월 15일",
            "오후 2:30",
            "김현수 교수",
            "정기 검진 완료, 특이사항 없음",
        ),
        record(
            2,
            family("박승희", "photo-1438761681033-6461ffad8d80"),
            "강남세브란스병원",
            "2024년 11월 10일",
            "오전 10:00",
            "이영희 원장",
            "감기 증상으로 내원, 약 처방",
        ),
        record(
            3,
            family("김동석", "photo-1500648767791-00dcc994a43e"),
            "아산병원",
            "2024년 11월 5일",
            "오후 4:00",
            "박민준 교수",
            "건강검진 상담",
        ),
    ]
}

pub fn medical_visits() -> Vec<MedicalVisit> {
    [
        (VisitKind::Pharmacy, "우리온누리약국", "2024년 11월 16일", "토요일"),
        (VisitKind::Hospital, "서울대학교병원", "2024년 11월 15일", "금요일"),
        (VisitKind::Pharmacy, "건강플러스약국", "2024년 11월 12일", "화요일"),
        (VisitKind::Hospital, "강남세브란스병원", "2024년 11월 10일", "일요일"),
        (VisitKind::Pharmacy, "메디팜약국", "2024년 11월 6일", "수요일"),
        (VisitKind::Hospital, "아산병원", "2024년 11월 5일", "화요일"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((kind, name, date, day), id)| MedicalVisit {
        id,
        kind,
        name: name.into(),
        visit_date: date.into(),
        day_of_week: day.into(),
    })
    .collect()
}

pub fn reviews() -> Vec<Review> {
    let review = |id, hospital: &str, rating, visit_type, day: &str, tags: &[&str], content: &str, date: &str| Review {
        id,
        hospital_name: hospital.into(),
        rating,
        visit_type,
        day_of_week: day.into(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        content: content.into(),
        date: date.into(),
    };
    vec![
        review(
            1,
            "서울대학교병원",
            5,
            VisitType::Revisit,
            "금요일",
            &["친절해요", "전문적이에요", "시설이 깨끗해요"],
            "의사선생님께서 정말 친절하시고 자세히 설명해주셔서 좋았습니다.",
            "2024.11.15",
        ),
        review(
            2,
            "강남세브란스병원",
            4,
            VisitType::FirstVisit,
            "일요일",
            &["대기시간이 짧아요", "교통이 편리해요"],
            "일요일인데도 진료를 받을 수 있어서 좋았습니다.",
            "2024.11.10",
        ),
        review(
            3,
            "아산병원",
            5,
            VisitType::Revisit,
            "화요일",
            &["친절해요", "설명이 자세해요", "주차가 편리해요"],
            "건강검진 결과 상담을 받았는데 매우 자세하게 설명해주셨습니다.",
            "2024.11.05",
        ),
        review(
            4,
            "삼성서울병원",
            4,
            VisitType::FirstVisit,
            "수요일",
            &["시설이 좋아요", "전문적이에요"],
            "최신 장비로 검사받을 수 있어서 좋았습니다.",
            "2024.10.28",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn post_ids_are_unique() {
        let posts = posts();
        let ids: HashSet<_> = posts.iter().map(|post| post.id).collect();
        assert_eq!(ids.len(), posts.len());
    }

    #[test]
    fn seed_content_never_includes_the_current_user() {
        for post in posts() {
            assert!(post.comments.iter().all(|c| c.author.name != CURRENT_USER_NAME));
            assert!(post.reactions.iter().all(|r| !r.has_user(CURRENT_USER_NAME)));
        }
    }

    #[test]
    fn review_ratings_are_in_range() {
        assert!(reviews().iter().all(|r| (1..=5).contains(&r.rating)));
    }
}
