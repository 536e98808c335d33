//! Zone.log line classifier
//!
//! The client prints two shapes of line we care about:
//!
//! ```text
//! ... TRANSITIONING card [entityName=Alleycat id=12 zone=HAND zonePos=0 cardId=CFM_315 player=1] to FRIENDLY HAND
//! ... id=7 local=False [entityName=Alleycat id=12 zone=DECK zonePos=0 cardId=CFM_315 player=1] zone from FRIENDLY HAND -> FRIENDLY DECK
//! ```
//!
//! plus a few bare markers (`BEGIN_MULLIGAN`, the first-draw tag). Everything
//! else is noise and classifies to `None`.

use crate::core::{CardId, EntityTag};
use crate::events::{CardRef, GameOutcome, ZoneEvent};
use crate::zones::{Side, ZoneKind, ZoneLocation};
use crate::{AdvisorError, Result};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{digit1, space0, space1},
    combinator::{map_opt, map_res, opt, value},
    sequence::{delimited, preceded},
    IResult,
};

const MULLIGAN_MARKER: &str = "BEGIN_MULLIGAN";
const FIRST_DRAW_MARKER: &str = "tag=NUM_CARDS_DRAWN_THIS_TURN value=1";
const TRANSITIONING: &str = "TRANSITIONING card ";
const ENTITY_START: &str = "[entityName=";

/// Entity block fields as printed
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawEntity<'a> {
    name: &'a str,
    id: u32,
    card_id: &'a str,
}

/// A log zone plus its optional qualifier, e.g. `FRIENDLY PLAY (Hero)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawLocation<'a> {
    location: ZoneLocation,
    qualifier: Option<&'a str>,
}

impl RawLocation<'_> {
    fn is_hero(&self) -> bool {
        matches!(self.qualifier, Some("Hero") | Some("Hero Power"))
    }
}

fn entity_block(input: &str) -> IResult<&str, RawEntity<'_>> {
    let (input, _) = tag(ENTITY_START)(input)?;
    let (input, name) = take_until(" id=")(input)?;
    let (input, id) = preceded(tag(" id="), map_res(digit1, str::parse::<u32>))(input)?;
    let (input, _) = take_until("cardId=")(input)?;
    let (input, card_id) = preceded(tag("cardId="), take_until(" player="))(input)?;
    let (input, _) = preceded(tag(" player="), digit1)(input)?;
    let (input, _) = tag("]")(input)?;
    Ok((input, RawEntity { name, id, card_id }))
}

fn side(input: &str) -> IResult<&str, Side> {
    alt((
        value(Side::Friendly, tag("FRIENDLY")),
        value(Side::Opposing, tag("OPPOSING")),
    ))(input)
}

fn zone_kind(input: &str) -> IResult<&str, ZoneKind> {
    map_opt(take_while1(|c: char| c.is_ascii_uppercase()), ZoneKind::parse)(input)
}

fn qualifier(input: &str) -> IResult<&str, &str> {
    delimited(tag(" ("), take_until(")"), tag(")"))(input)
}

fn location(input: &str) -> IResult<&str, RawLocation<'_>> {
    let (input, side) = side(input)?;
    let (input, _) = space1(input)?;
    let (input, zone) = zone_kind(input)?;
    let (input, qualifier) = opt(qualifier)(input)?;
    Ok((
        input,
        RawLocation {
            location: ZoneLocation::new(side, zone),
            qualifier,
        },
    ))
}

/// `[entity] to SIDE ZONE`
fn transitioning(input: &str) -> IResult<&str, (RawEntity<'_>, RawLocation<'_>)> {
    let (input, entity) = entity_block(input)?;
    let (input, dest) = preceded(tag(" to "), location)(input)?;
    Ok((input, (entity, dest)))
}

/// `[entity] zone from [SIDE ZONE] -> SIDE ZONE`
#[allow(clippy::type_complexity)]
fn zone_change(input: &str) -> IResult<&str, (RawEntity<'_>, Option<RawLocation<'_>>, RawLocation<'_>)> {
    let (input, entity) = entity_block(input)?;
    let (input, _) = tag(" zone from")(input)?;
    let (input, from) = opt(preceded(space1, location))(input)?;
    let (input, _) = delimited(space0, tag("->"), space1)(input)?;
    let (input, to) = location(input)?;
    Ok((input, (entity, from, to)))
}

fn malformed(line: &str) -> AdvisorError {
    AdvisorError::MalformedEvent(line.trim().to_string())
}

/// Friendly cards must name their card id; opposing ones may be hidden
fn card_ref(entity: &RawEntity<'_>, side: Side, line: &str) -> Result<CardRef> {
    if entity.card_id.is_empty() && side == Side::Friendly {
        return Err(malformed(line));
    }
    Ok(CardRef {
        card_id: CardId::new(entity.card_id),
        tag: Some(EntityTag::new(entity.id)),
        name: entity.name.to_string(),
    })
}

/// Classify one Zone.log line
///
/// Returns `Ok(None)` for lines that carry nothing the tracker needs, and
/// `MalformedEvent` when a line is recognised but its fields cannot be read.
pub fn classify_line(line: &str) -> Result<Option<ZoneEvent>> {
    if line.contains(MULLIGAN_MARKER) {
        return Ok(Some(ZoneEvent::MulliganMarker));
    }
    if line.contains(FIRST_DRAW_MARKER) {
        return Ok(Some(ZoneEvent::FirstDrawMarker));
    }
    if line.contains("(Hero) -> OPPOSING GRAVEYARD") {
        return Ok(Some(ZoneEvent::GameEnd(GameOutcome::Victory)));
    }
    if line.contains("(Hero) -> FRIENDLY GRAVEYARD") {
        return Ok(Some(ZoneEvent::GameEnd(GameOutcome::Defeat)));
    }

    if let Some(pos) = line.find(TRANSITIONING) {
        let rest = &line[pos + TRANSITIONING.len()..];
        let (_, (entity, dest)) = transitioning(rest).map_err(|_| malformed(line))?;
        return classify_transitioning(&entity, dest, line);
    }

    if line.contains(" zone from") {
        if let Some(pos) = line.find(ENTITY_START) {
            let (_, (entity, from, to)) = zone_change(&line[pos..]).map_err(|_| malformed(line))?;
            return classify_zone_change(&entity, from, to, line);
        }
    }

    Ok(None)
}

fn classify_transitioning(entity: &RawEntity<'_>, dest: RawLocation<'_>, line: &str) -> Result<Option<ZoneEvent>> {
    if dest.is_hero() {
        return Ok(None);
    }

    let to = dest.location;
    match (to.side, to.zone) {
        // The matching "zone from" line carries the origin; wait for it
        (Side::Friendly, ZoneKind::Deck) => Ok(None),
        (Side::Opposing, ZoneKind::Hand) => Ok(Some(ZoneEvent::OpponentHandAdd(Some(EntityTag::new(entity.id))))),
        (Side::Friendly, ZoneKind::Hand | ZoneKind::Play | ZoneKind::Secret | ZoneKind::Graveyard)
        | (Side::Opposing, ZoneKind::Play | ZoneKind::Graveyard | ZoneKind::Secret) => {
            Ok(Some(ZoneEvent::transition(card_ref(entity, to.side, line)?, None, to)))
        }
        _ => Ok(None),
    }
}

fn classify_zone_change(
    entity: &RawEntity<'_>,
    from: Option<RawLocation<'_>>,
    to: RawLocation<'_>,
    line: &str,
) -> Result<Option<ZoneEvent>> {
    let from = match from {
        Some(from) if !from.is_hero() && !to.is_hero() => from.location,
        _ => return Ok(None),
    };

    let friendly_deck = ZoneLocation::friendly(ZoneKind::Deck);
    if from == ZoneLocation::friendly(ZoneKind::Hand) && to.location == friendly_deck {
        return Ok(Some(ZoneEvent::transition(
            card_ref(entity, Side::Friendly, line)?,
            Some(from),
            to.location,
        )));
    }
    if from == friendly_deck && to.location == ZoneLocation::friendly(ZoneKind::Graveyard) {
        return Ok(Some(ZoneEvent::DrawResolved));
    }
    Ok(None)
}
