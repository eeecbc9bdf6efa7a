//! 命令行定义

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};

use academy_core::{ClassType, DayOfWeek, Role, Subject};

#[derive(Parser, Debug)]
#[command(author, version, about = "학원 관리 콘솔")]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, value_name = "FILE", env = "ACADEMY_ADMIN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 로그인하고 세션을 저장
    Login {
        username: String,
        #[arg(long, env = "ACADEMY_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// 로그아웃
    Logout,
    /// 현재 로그인한 사용자
    Whoami,
    /// 현재 역할로 볼 수 있는 메뉴
    Menu,
    /// 회원 관리
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// 반 관리
    Classes {
        #[command(subcommand)]
        command: ClassesCommand,
    },
    /// 학생 관리
    Students {
        #[command(subcommand)]
        command: StudentsCommand,
    },
    /// 출석 기록
    Attendance {
        #[command(subcommand)]
        command: AttendanceCommand,
    },
    /// 시험 기록
    Exams {
        #[command(subcommand)]
        command: ExamsCommand,
    },
    /// 대시보드 통계
    Dashboard {
        #[arg(long = "class", value_name = "CLASS_ID")]
        class_id: Option<u64>,
        /// YYYY-MM
        #[arg(long)]
        month: Option<String>,
        /// 시험 이름에 포함된 키워드별 성적 (반 지정 시)
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
    /// 학부모 알림 전송
    Notify {
        #[command(subcommand)]
        command: NotifyCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List,
    Show {
        id: u64,
    },
    Create {
        username: String,
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = parse_role)]
        role: Role,
        #[arg(long, value_parser = parse_subject)]
        subject: Option<Subject>,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// 회원 정보 수정
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_role)]
        role: Option<Role>,
        #[arg(long, value_parser = parse_subject)]
        subject: Option<Subject>,
    },
    /// 본인 프로필 수정
    ProfileEdit {
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_subject)]
        subject: Option<Subject>,
    },
    Delete {
        id: u64,
    },
    /// 본인 비밀번호 변경, 또는 ID를 지정해 다른 사용자 비밀번호 초기화
    Passwd {
        id: Option<u64>,
        /// 본인 변경 시 필요
        #[arg(long)]
        old: Option<String>,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClassesCommand {
    List {
        #[arg(long, value_parser = parse_subject)]
        subject: Option<Subject>,
    },
    Show {
        id: u64,
    },
    Create {
        name: String,
        #[arg(long, value_parser = parse_subject)]
        subject: Subject,
        #[arg(long, value_parser = parse_day)]
        day: DayOfWeek,
        /// HH:MM
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
    },
    /// 지정한 항목만 변경
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_subject)]
        subject: Option<Subject>,
        #[arg(long, value_parser = parse_day)]
        day: Option<DayOfWeek>,
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,
    },
    Delete {
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum StudentsCommand {
    List {
        #[arg(long = "class", value_name = "CLASS_ID")]
        class_id: Option<u64>,
    },
    Show {
        id: u64,
    },
    Create {
        name: String,
        #[arg(long = "class", value_name = "CLASS_ID")]
        class_id: u64,
        #[arg(long)]
        parent_phone: String,
        #[arg(long)]
        student_phone: Option<String>,
    },
    /// 지정한 항목만 변경
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "class", value_name = "CLASS_ID")]
        class_id: Option<u64>,
        #[arg(long)]
        parent_phone: Option<String>,
        #[arg(long)]
        student_phone: Option<String>,
    },
    Delete {
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum AttendanceCommand {
    List {
        #[arg(long = "student", value_name = "STUDENT_ID")]
        student_id: Option<u64>,
        #[arg(long = "class", value_name = "CLASS_ID")]
        class_id: Option<u64>,
        /// YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    Add {
        #[arg(long = "student", value_name = "STUDENT_ID")]
        student_id: u64,
        /// 기본값은 오늘
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long = "type", value_parser = parse_class_type, default_value = "REGULAR")]
        class_type: ClassType,
        #[arg(long)]
        content: String,
        #[arg(long)]
        late: bool,
        /// 숙제 이행도 (%)
        #[arg(long, default_value_t = 0)]
        completion: u32,
        /// 숙제 정답률 (%)
        #[arg(long, default_value_t = 0)]
        accuracy: u32,
    },
    /// 지정한 항목만 변경
    Edit {
        id: u64,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long = "type", value_parser = parse_class_type)]
        class_type: Option<ClassType>,
        #[arg(long)]
        content: Option<String>,
        /// true 또는 false
        #[arg(long)]
        late: Option<bool>,
        #[arg(long)]
        completion: Option<u32>,
        #[arg(long)]
        accuracy: Option<u32>,
    },
    Delete {
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExamsCommand {
    List {
        #[arg(long = "student", value_name = "STUDENT_ID")]
        student_id: Option<u64>,
        #[arg(long = "class", value_name = "CLASS_ID")]
        class_id: Option<u64>,
    },
    Add {
        #[arg(long = "attendance", value_name = "ATTENDANCE_ID")]
        attendance_id: u64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        score: u32,
        #[arg(long, default_value_t = 100)]
        max_score: u32,
    },
    /// 지정한 항목만 변경
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        score: Option<u32>,
        #[arg(long)]
        max_score: Option<u32>,
    },
    Delete {
        id: u64,
    },
    /// 시험별 평균
    Averages {
        #[arg(long = "class", value_name = "CLASS_ID")]
        class_id: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotifyCommand {
    /// 한 학생의 특정 출석 기록
    Single {
        #[arg(long = "student", value_name = "STUDENT_ID")]
        student_id: u64,
        #[arg(long = "attendance", value_name = "ATTENDANCE_ID")]
        attendance_id: u64,
    },
    /// 여러 학생의 특정 날짜
    Bulk {
        #[arg(long = "student", value_name = "STUDENT_ID", required = true)]
        student_ids: Vec<u64>,
        /// 기본값은 오늘
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
}

/// 接受线上格式（大小写不敏感）或韩文名称
fn parse_role(s: &str) -> Result<Role, String> {
    match s.to_ascii_uppercase().as_str() {
        "ADMIN" | "관리자" => Ok(Role::Admin),
        "TEACHER" | "선생님" => Ok(Role::Teacher),
        "ASSISTANT" | "조교" => Ok(Role::Assistant),
        _ => Err(format!("알 수 없는 역할: {s} (ADMIN, TEACHER, ASSISTANT)")),
    }
}

fn parse_subject(s: &str) -> Result<Subject, String> {
    match s.to_ascii_uppercase().replace('-', "_").as_str() {
        "CHEMISTRY" | "화학" => Ok(Subject::Chemistry),
        "BIOLOGY" | "생명" => Ok(Subject::Biology),
        "EARTH_SCIENCE" | "지학" => Ok(Subject::EarthScience),
        _ => Err(format!(
            "알 수 없는 과목: {s} (CHEMISTRY, BIOLOGY, EARTH_SCIENCE)"
        )),
    }
}

fn parse_day(s: &str) -> Result<DayOfWeek, String> {
    let day = match s.to_ascii_uppercase().as_str() {
        "MONDAY" | "MON" | "월" | "월요일" => DayOfWeek::Monday,
        "TUESDAY" | "TUE" | "화" | "화요일" => DayOfWeek::Tuesday,
        "WEDNESDAY" | "WED" | "수" | "수요일" => DayOfWeek::Wednesday,
        "THURSDAY" | "THU" | "목" | "목요일" => DayOfWeek::Thursday,
        "FRIDAY" | "FRI" | "금" | "금요일" => DayOfWeek::Friday,
        "SATURDAY" | "SAT" | "토" | "토요일" => DayOfWeek::Saturday,
        "SUNDAY" | "SUN" | "일" | "일요일" => DayOfWeek::Sunday,
        _ => return Err(format!("알 수 없는 요일: {s}")),
    };
    Ok(day)
}

fn parse_class_type(s: &str) -> Result<ClassType, String> {
    match s.to_ascii_uppercase().as_str() {
        "REGULAR" | "정규" => Ok(ClassType::Regular),
        "MAKEUP" | "대체" => Ok(ClassType::Makeup),
        "EXTRA" | "보강" => Ok(ClassType::Extra),
        "ADDITIONAL" | "추가" => Ok(ClassType::Additional),
        _ => Err(format!(
            "알 수 없는 수업 유형: {s} (REGULAR, MAKEUP, EXTRA, ADDITIONAL)"
        )),
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("시간 형식은 HH:MM 입니다: {s}"))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("날짜 형식은 YYYY-MM-DD 입니다: {s}"))
}
