use eframe::egui;

use super::widgets::{hint, secret_row, section, text_row, DirtySet};
use crate::config::FieldId;
use crate::form::FormState;
use crate::gui::constants::*;
use crate::site_rules;

pub fn ui(ui: &mut egui::Ui, form: &mut FormState, dirty: &DirtySet) -> bool {
    let mut changed = false;

    section(ui, "Session cookies", |ui| {
        changed |= secret_row(ui, "tixcraft SID:", &mut form.tixcraft_sid, Some((FieldId::TixcraftSid, dirty)));
        if site_rules::tixcraft_sid_warning(&form.tixcraft_sid) {
            hint(ui, WARNING_COLOR, "Values starting with g. are not the tixcraft SID cookie");
        }
        changed |= secret_row(ui, "ibon qware:", &mut form.ibonqware, Some((FieldId::Ibonqware, dirty)));
        changed |= secret_row(
            ui,
            "FunOne session:",
            &mut form.funone_session_cookie,
            Some((FieldId::FunoneSessionCookie, dirty)),
        );
        changed |= secret_row(ui, "FANSI GO cookie:", &mut form.fansigo_cookie, Some((FieldId::FansigoCookie, dirty)));
    });

    // (label, account, password); either side may be absent
    let logins: [(&str, &mut String, FieldId, Option<(&mut String, FieldId)>); 10] = [
        ("Facebook", &mut form.facebook_account, FieldId::FacebookAccount, Some((&mut form.facebook_password, FieldId::FacebookPassword))),
        ("KKTIX", &mut form.kktix_account, FieldId::KktixAccount, Some((&mut form.kktix_password, FieldId::KktixPassword))),
        ("FamiTicket", &mut form.fami_account, FieldId::FamiAccount, Some((&mut form.fami_password, FieldId::FamiPassword))),
        ("Cityline", &mut form.cityline_account, FieldId::CitylineAccount, None),
        ("URBTIX", &mut form.urbtix_account, FieldId::UrbtixAccount, Some((&mut form.urbtix_password, FieldId::UrbtixPassword))),
        ("HKTicketing", &mut form.hkticketing_account, FieldId::HkticketingAccount, Some((&mut form.hkticketing_password, FieldId::HkticketingPassword))),
        ("KHAM", &mut form.kham_account, FieldId::KhamAccount, Some((&mut form.kham_password, FieldId::KhamPassword))),
        ("ticket.com.tw", &mut form.ticket_account, FieldId::TicketAccount, Some((&mut form.ticket_password, FieldId::TicketPassword))),
        ("UDN", &mut form.udn_account, FieldId::UdnAccount, Some((&mut form.udn_password, FieldId::UdnPassword))),
        ("TicketPlus", &mut form.ticketplus_account, FieldId::TicketplusAccount, Some((&mut form.ticketplus_password, FieldId::TicketplusPassword))),
    ];

    section(ui, "Logins", |ui| {
        for (site, account, account_id, password) in logins {
            changed |= text_row(ui, &format!("{site} account:"), account, Some((account_id, dirty)));
            if account_id == FieldId::CitylineAccount && site_rules::cityline_login_hint(account) {
                hint(ui, INFO_COLOR, "Cityline logs in through the browser window; the password is not stored");
            }
            if let Some((password, password_id)) = password {
                changed |= secret_row(ui, &format!("{site} password:"), password, Some((password_id, dirty)));
            }
            ui.add_space(ITEM_SPACING / 2.0);
        }
    });

    section(ui, "Discount", |ui| {
        changed |= text_row(ui, "Discount code:", &mut form.discount_code, Some((FieldId::DiscountCode, dirty)));
    });

    changed
}
